use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use news_core::Error as NewsError;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug)]
pub struct ServerError(anyhow::Error);

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{:#}", self.0);
        } else {
            tracing::info!("Rejected request: {}", self);
        }
        (status, Json(self.body(status))).into_response()
    }
}

impl ServerError {
    fn news_error(&self) -> Option<&NewsError> {
        self.0.chain().find_map(|cause| cause.downcast_ref::<NewsError>())
    }

    fn status_code(&self) -> StatusCode {
        match self.news_error() {
            Some(NewsError::InvalidTags { .. })
            | Some(NewsError::MissingParameter { .. })
            | Some(NewsError::InvalidParameter(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self, status: StatusCode) -> Value {
        match self.news_error() {
            Some(NewsError::InvalidTags { available, .. }) => json!({
                "error": self.to_string(),
                "availableTags": available,
            }),
            Some(NewsError::MissingParameter { example, .. }) => json!({
                "error": self.to_string(),
                "example": example,
            }),
            _ if status.is_client_error() => json!({ "error": self.to_string() }),
            _ => json!({
                "error": "Failed to fetch news",
                "message": self.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_and_body() {
        let err = ServerError::from(NewsError::InvalidTags {
            invalid: vec!["medan".to_string()],
            available: vec!["jakarta".to_string()],
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body(StatusCode::BAD_REQUEST),
            json!({ "error": "Invalid tags: medan", "availableTags": ["jakarta"] })
        );

        let err = ServerError::from(NewsError::MissingParameter {
            name: "q".to_string(),
            example: "/api/v2/search?q=pemilu".to_string(),
        });
        assert_eq!(
            err.body(err.status_code()),
            json!({ "error": "Parameter \"q\" is required", "example": "/api/v2/search?q=pemilu" })
        );

        let err = ServerError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.body(StatusCode::INTERNAL_SERVER_ERROR),
            json!({ "error": "Failed to fetch news", "message": "boom" })
        );
    }
}
