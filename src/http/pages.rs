//! Server-rendered HTML for each page.

use super::forms::NewStudentForm;
use crate::calc::{SubjectScores, SUBJECTS};
use crate::store::{Marks, Student, StudentRow};

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<h1>{}</h1>\n{}\n</body>\n</html>\n",
        escape(title),
        escape(title),
        body
    )
}

fn subject_label(subject: &str) -> String {
    let mut chars = subject.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn index_page(rows: &[StudentRow], search: Option<&str>) -> String {
    let search = search.unwrap_or("");
    let mut body = String::new();
    body.push_str(&format!(
        "<form method=\"get\" action=\"/\">\n<input type=\"text\" name=\"search\" value=\"{}\" placeholder=\"Search name or roll\">\n<button type=\"submit\">Search</button>\n</form>\n",
        escape(search)
    ));
    body.push_str("<p><a href=\"/add_student\">Add Student</a></p>\n");

    if rows.is_empty() {
        body.push_str("<p>No students found.</p>\n");
        return layout("Students", &body);
    }

    body.push_str("<table>\n<tr><th>Name</th><th>Roll</th><th>Attendance</th><th>Marks</th><th></th></tr>\n");
    for row in rows {
        let s = &row.student;
        let marks_cell = match row.mark_id {
            Some(_) => format!(
                "<a href=\"/view/{id}\">View</a> | <a href=\"/add_marks/{id}\">Edit Marks</a>",
                id = s.id
            ),
            None => format!("<a href=\"/add_marks/{}\">Add Marks</a>", s.id),
        };
        body.push_str(&format!(
            "<tr><td><a href=\"/view/{id}\">{name}</a></td><td>{roll}</td><td>{att:.2}%</td><td>{marks}</td><td><form method=\"post\" action=\"/delete_student/{id}\"><button type=\"submit\">Delete</button></form></td></tr>\n",
            id = s.id,
            name = escape(&s.name),
            roll = escape(&s.roll),
            att = s.attendance,
            marks = marks_cell,
        ));
    }
    body.push_str("</table>\n");
    layout("Students", &body)
}

pub fn add_student_page(error: Option<&str>, previous: Option<&NewStudentForm>) -> String {
    let mut body = String::new();
    if let Some(msg) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(msg)));
    }
    let (name, roll, total_days, attended_days) = match previous {
        Some(f) => (
            escape(&f.name),
            escape(&f.roll),
            escape(&f.total_days),
            escape(&f.attended_days),
        ),
        None => Default::default(),
    };
    body.push_str(&format!(
        "<form method=\"post\" action=\"/add_student\">\n\
         <label>Name <input type=\"text\" name=\"name\" value=\"{}\" required></label><br>\n\
         <label>Roll <input type=\"text\" name=\"roll\" value=\"{}\" required></label><br>\n\
         <label>Total days <input type=\"number\" name=\"total_days\" value=\"{}\" required></label><br>\n\
         <label>Attended days <input type=\"number\" name=\"attended_days\" value=\"{}\" required></label><br>\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n<p><a href=\"/\">Back</a></p>\n",
        name,
        roll,
        total_days,
        attended_days,
    ));
    layout("Add Student", &body)
}

pub fn add_marks_page(student: &Student, marks: Option<&Marks>) -> String {
    let current = marks.map(|m| m.scores.as_array());
    let mut body = String::new();
    body.push_str(&format!(
        "<p>{} ({})</p>\n<form method=\"post\" action=\"/add_marks/{}\">\n",
        escape(&student.name),
        escape(&student.roll),
        student.id
    ));
    for (i, subject) in SUBJECTS.iter().enumerate() {
        let value = current.map(|v| v[i].to_string()).unwrap_or_default();
        body.push_str(&format!(
            "<label>{} <input type=\"number\" name=\"{}\" value=\"{}\" required></label><br>\n",
            subject_label(subject),
            subject,
            value
        ));
    }
    body.push_str("<button type=\"submit\">Save</button>\n</form>\n");
    body.push_str(&format!("<p><a href=\"/view/{}\">Back</a></p>\n", student.id));
    layout("Enter Marks", &body)
}

fn scores_table(scores: &SubjectScores) -> String {
    let mut out = String::from("<table>\n<tr><th>Subject</th><th>Score</th></tr>\n");
    for (subject, value) in SUBJECTS.iter().zip(scores.as_array()) {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            subject_label(subject),
            value
        ));
    }
    out.push_str("</table>\n");
    out
}

pub fn view_page(student: &Student, marks: Option<&Marks>) -> String {
    let mut body = format!(
        "<p>Name: {}</p>\n<p>Roll: {}</p>\n<p>Attendance: {:.2}%</p>\n",
        escape(&student.name),
        escape(&student.roll),
        student.attendance
    );
    match marks {
        Some(m) => {
            body.push_str(&scores_table(&m.scores));
            body.push_str(&format!(
                "<p>Total: {}</p>\n<p>Result: {}</p>\n<p>Grade: {}</p>\n",
                m.total, m.result, m.grade
            ));
            body.push_str(&format!(
                "<p><a href=\"/add_marks/{}\">Edit Marks</a></p>\n",
                student.id
            ));
        }
        None => {
            body.push_str(&format!(
                "<p>No marks entered yet. <a href=\"/add_marks/{}\">Add Marks</a></p>\n",
                student.id
            ));
        }
    }
    body.push_str("<p><a href=\"/\">Back</a></p>\n");
    layout("Student Record", &body)
}

pub fn error_page(status: u16, code: &str, detail: &str) -> String {
    let body = format!(
        "<p>{} {}</p>\n<p>{}</p>\n<p><a href=\"/\">Back to students</a></p>\n",
        status,
        escape(code),
        escape(detail)
    );
    layout("Error", &body)
}
