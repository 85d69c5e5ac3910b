use std::fmt;

/// Any single subject below this fails the student outright.
pub const PASS_MARK: i64 = 35;

/// Largest magnitude a single score may have. Six scores inside this bound
/// always sum without leaving `i64`.
pub const SCORE_LIMIT: i64 = i64::MAX / 6;

pub const SUBJECTS: [&str; 6] = [
    "english",
    "maths",
    "physics",
    "chemistry",
    "biology",
    "computer",
];

/// The six subject scores, in the fixed column order of `SUBJECTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubjectScores {
    pub english: i64,
    pub maths: i64,
    pub physics: i64,
    pub chemistry: i64,
    pub biology: i64,
    pub computer: i64,
}

impl SubjectScores {
    pub fn from_array(v: [i64; 6]) -> Self {
        Self {
            english: v[0],
            maths: v[1],
            physics: v[2],
            chemistry: v[3],
            biology: v[4],
            computer: v[5],
        }
    }

    pub fn as_array(&self) -> [i64; 6] {
        [
            self.english,
            self.maths,
            self.physics,
            self.chemistry,
            self.biology,
            self.computer,
        ]
    }

    /// Sum of the six scores, or `None` when it does not fit in `i64`.
    pub fn checked_total(&self) -> Option<i64> {
        self.as_array()
            .iter()
            .try_fold(0i64, |acc, &v| acc.checked_add(v))
    }

    /// First subject whose score lies outside `SCORE_LIMIT`, with that score.
    pub fn out_of_range(&self) -> Option<(&'static str, i64)> {
        SUBJECTS
            .iter()
            .zip(self.as_array())
            .find(|(_, v)| !score_in_range(*v))
            .map(|(name, v)| (*name, v))
    }
}

pub fn score_in_range(v: i64) -> bool {
    (-SCORE_LIMIT..=SCORE_LIMIT).contains(&v)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pass => "Pass",
            Outcome::Fail => "Fail",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pass" => Some(Outcome::Pass),
            "Fail" => Some(Outcome::Fail),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "F" => Some(Grade::F),
            _ => None,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived fields cached next to the raw scores in the `marks` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derived {
    pub total: i64,
    pub result: Outcome,
    pub grade: Grade,
}

/// Pass/fail and letter grade for one set of six scores.
///
/// A single score under `PASS_MARK` fails regardless of the average.
/// Otherwise the real-valued average picks the band: `>= 75` is A,
/// `>= 50` is B, anything lower is C.
pub fn result_and_grade(scores: &SubjectScores) -> (Outcome, Grade) {
    let values = scores.as_array();
    if values.iter().any(|&m| m < PASS_MARK) {
        return (Outcome::Fail, Grade::F);
    }
    let sum: i128 = values.iter().map(|&m| i128::from(m)).sum();
    let avg = sum as f64 / values.len() as f64;
    if avg >= 75.0 {
        (Outcome::Pass, Grade::A)
    } else if avg >= 50.0 {
        (Outcome::Pass, Grade::B)
    } else {
        (Outcome::Pass, Grade::C)
    }
}

/// Total, result and grade together. `None` when the total overflows `i64`,
/// since no stored row could then agree with its scores.
pub fn derive(scores: &SubjectScores) -> Option<Derived> {
    let total = scores.checked_total()?;
    let (result, grade) = result_and_grade(scores);
    Some(Derived {
        total,
        result,
        grade,
    })
}

/// `attended / total * 100`. Callers reject `total_days == 0` first.
pub fn attendance_percent(attended_days: i64, total_days: i64) -> f64 {
    (attended_days as f64 / total_days as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(v: [i64; 6]) -> SubjectScores {
        SubjectScores::from_array(v)
    }

    #[test]
    fn all_forties_is_a_pass_with_c() {
        let d = derive(&scores([40, 40, 40, 40, 40, 40])).expect("in range");
        assert_eq!(d.total, 240);
        assert_eq!(d.result, Outcome::Pass);
        assert_eq!(d.grade, Grade::C);
    }

    #[test]
    fn all_nineties_is_a_pass_with_a() {
        let d = derive(&scores([90, 90, 90, 90, 90, 90])).expect("in range");
        assert_eq!(d.total, 540);
        assert_eq!((d.result, d.grade), (Outcome::Pass, Grade::A));
    }

    #[test]
    fn one_low_subject_fails_despite_high_average() {
        let d = derive(&scores([30, 90, 90, 90, 90, 90])).expect("in range");
        assert_eq!(d.total, 480);
        assert_eq!((d.result, d.grade), (Outcome::Fail, Grade::F));
    }

    #[test]
    fn band_edges_are_inclusive() {
        assert_eq!(
            result_and_grade(&scores([75, 75, 75, 75, 75, 75])),
            (Outcome::Pass, Grade::A)
        );
        assert_eq!(
            result_and_grade(&scores([50, 50, 50, 50, 50, 50])),
            (Outcome::Pass, Grade::B)
        );
        assert_eq!(
            result_and_grade(&scores([35, 35, 35, 35, 35, 35])),
            (Outcome::Pass, Grade::C)
        );
        assert_eq!(
            result_and_grade(&scores([35, 35, 35, 35, 35, 34])),
            (Outcome::Fail, Grade::F)
        );
    }

    #[test]
    fn average_is_real_valued() {
        // Sum 449 -> 74.83, must not round up into the A band.
        assert_eq!(
            result_and_grade(&scores([75, 75, 75, 75, 75, 74])),
            (Outcome::Pass, Grade::B)
        );
        // Sum 299 -> 49.83, stays in C.
        assert_eq!(
            result_and_grade(&scores([50, 50, 50, 50, 50, 49])),
            (Outcome::Pass, Grade::C)
        );
    }

    #[test]
    fn huge_scores_do_not_overflow() {
        let big = scores([2_000_000_000_000_000_000; 6]);
        assert_eq!(big.checked_total(), None);
        assert_eq!(derive(&big), None);
        assert_eq!(big.out_of_range(), Some(("english", 2_000_000_000_000_000_000)));
        // Banding still works on the widened sum.
        assert_eq!(result_and_grade(&big), (Outcome::Pass, Grade::A));

        let edge = scores([SCORE_LIMIT; 6]);
        assert_eq!(edge.out_of_range(), None);
        assert_eq!(derive(&edge).map(|d| d.total), Some(SCORE_LIMIT * 6));
        let low = scores([0, 0, -SCORE_LIMIT - 1, 0, 0, 0]);
        assert_eq!(low.out_of_range().map(|(name, _)| name), Some("physics"));
    }

    #[test]
    fn stored_text_parses_back() {
        for o in [Outcome::Pass, Outcome::Fail] {
            assert_eq!(Outcome::parse(o.as_str()), Some(o));
        }
        for g in [Grade::A, Grade::B, Grade::C, Grade::F] {
            assert_eq!(Grade::parse(g.as_str()), Some(g));
        }
        assert_eq!(Grade::parse("D"), None);
        assert_eq!(Outcome::parse("pass"), None);
    }

    #[test]
    fn attendance_is_a_percentage() {
        assert_eq!(attendance_percent(3, 4), 75.0);
        assert_eq!(attendance_percent(0, 10), 0.0);
    }
}
