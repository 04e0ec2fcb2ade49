//! Probe endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::health::{Checks, ReadinessReport};

/// Liveness: if this runs, the process can serve HTTP.
pub(crate) async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness: run every check and report each result.
///
/// Checks are synchronous, so evaluation moves to the blocking pool. They
/// still run one after another.
pub(crate) async fn readiness(State(checks): State<Arc<Checks>>) -> Response {
    match tokio::task::spawn_blocking(move || ReadinessReport::evaluate(&checks)).await {
        Ok(report) => {
            if !report.is_ready() {
                tracing::debug!(checks = report.len(), "Readiness probe failed");
            }
            render(report.is_ready(), report.results())
        }
        Err(e) => {
            tracing::error!(error = %e, "Health check evaluation panicked");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// JSON body with 200 when `ready`, 500 otherwise. A body that fails to
/// serialize becomes a plain-text 500 carrying the error.
pub(crate) fn render<T>(ready: bool, body: &T) -> Response
where
    T: Serialize + ?Sized,
{
    match serde_json::to_vec(body) {
        Ok(bytes) => {
            let status = if ready {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, [(header::CONTENT_TYPE, "application/json")], bytes).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::CheckError;
    use http_body_util::BodyExt;
    use serde::ser::{Error as _, Serializer};

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot encode report"))
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn liveness_always_ok() {
        let response = liveness().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn readiness_passes_with_healthy_checks() {
        let checks = Arc::new(Checks::new().with("db", || Ok::<_, CheckError>(())));
        let response = readiness(State(checks)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(
            body_text(response).await,
            r#"{"db":{"ok":true,"messages":""}}"#
        );
    }

    #[tokio::test]
    async fn readiness_fails_with_broken_check() {
        let checks = Arc::new(Checks::new().with("db", || Err::<(), _>("oops")));
        let response = readiness(State(checks)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            r#"{"db":{"ok":false,"messages":"oops"}}"#
        );
    }

    #[tokio::test]
    async fn serialization_failure_is_plain_text() {
        let response = render(true, &Unserializable);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body_text(response).await, "cannot encode report");
    }

    #[tokio::test]
    async fn panicking_check_yields_server_error() {
        let checks = Arc::new(Checks::new().with("bad", || -> Result<(), CheckError> {
            panic!("check blew up")
        }));
        let response = readiness(State(checks)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
