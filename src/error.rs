use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Everything the lifecycle engine can refuse to do. Each variant is
/// surfaced to the caller as a distinct JSON message; nothing is retried or
/// swallowed.
#[derive(Debug, Display, Clone, Eq, PartialEq)]
pub enum WorkflowError {
    #[display(fmt = "employee or leave request not found")]
    NotFound,
    #[display(fmt = "end_date must not be before start_date")]
    InvalidRange,
    #[display(fmt = "start_date must not be in the past")]
    PastDate,
    #[display(fmt = "range overlaps an already approved leave for this employee")]
    OverlapConflict,
    #[display(fmt = "caller is not permitted to perform this action")]
    Unauthorized,
    #[display(fmt = "only pending requests can be cancelled")]
    InvalidState,
    #[display(fmt = "unrecognized status value: {}", _0)]
    InvalidStatus(String),
}

impl std::error::Error for WorkflowError {}

impl ResponseError for WorkflowError {
    fn status_code(&self) -> StatusCode {
        match self {
            WorkflowError::NotFound => StatusCode::NOT_FOUND,
            WorkflowError::InvalidRange
            | WorkflowError::PastDate
            | WorkflowError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            WorkflowError::OverlapConflict | WorkflowError::InvalidState => StatusCode::CONFLICT,
            WorkflowError::Unauthorized => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_distinct_http_codes() {
        assert_eq!(WorkflowError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            WorkflowError::Unauthorized.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            WorkflowError::OverlapConflict.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            WorkflowError::InvalidStatus("Maybe".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn invalid_status_names_offending_value() {
        let err = WorkflowError::InvalidStatus("Cancelled".into());
        assert!(err.to_string().contains("Cancelled"));
    }
}
