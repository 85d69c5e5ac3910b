use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

/// Emits one `request_completed` event per request, levelled by status class.
/// Requests against a single student also carry its `student_id`.
pub struct StructuredLogger;

const STUDENT_ROUTES: [&str; 3] = ["/view/", "/add_marks/", "/delete_student/"];

fn student_id_from_path(path: &str) -> Option<i64> {
    STUDENT_ROUTES
        .iter()
        .find_map(|prefix| path.strip_prefix(prefix))
        .and_then(|rest| rest.parse().ok())
}

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let student_id = student_id_from_path(&path);

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let duration_us = start.elapsed().as_micros() as u64;
            let status_code = status.as_u16();

            if status.is_server_error() {
                error!(
                    http.method = %method,
                    url.path = %path,
                    http.status_code = status_code,
                    student_id,
                    duration_us,
                    "request_completed"
                );
            } else if status.is_client_error() {
                warn!(
                    http.method = %method,
                    url.path = %path,
                    http.status_code = status_code,
                    student_id,
                    duration_us,
                    "request_completed"
                );
            } else {
                info!(
                    http.method = %method,
                    url.path = %path,
                    http.status_code = status_code,
                    student_id,
                    duration_us,
                    "request_completed"
                );
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::student_id_from_path;

    #[test]
    fn student_routes_yield_their_id() {
        assert_eq!(student_id_from_path("/view/12"), Some(12));
        assert_eq!(student_id_from_path("/add_marks/3"), Some(3));
        assert_eq!(student_id_from_path("/delete_student/7"), Some(7));
    }

    #[test]
    fn other_paths_have_no_student() {
        assert_eq!(student_id_from_path("/"), None);
        assert_eq!(student_id_from_path("/add_student"), None);
        assert_eq!(student_id_from_path("/view/abc"), None);
        assert_eq!(student_id_from_path("/health"), None);
    }
}
