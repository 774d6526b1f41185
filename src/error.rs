use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::{Display, Error};
use serde_json::json;

use crate::store::StoreError;

/// Business-rule and lookup failures surfaced to API callers.
///
/// Every variant except `Store` is a deterministic rule violation detected
/// before any write; `Store` wraps infrastructure failures and is reported
/// opaquely.
#[derive(Debug, Display, Error)]
pub enum LeaveError {
    #[display(fmt = "Leave request {} not found", _0)]
    NotFound(#[error(not(source))] u64),

    #[display(fmt = "Employee {} not found", _0)]
    EmployeeNotFound(#[error(not(source))] u64),

    #[display(fmt = "Leave dates overlap an existing request for this employee")]
    Overlap,

    #[display(fmt = "Annual leave quota of 20 days exceeded for the year")]
    AnnualQuotaExceeded,

    #[display(fmt = "Sick leave requires a reason")]
    MissingReason,

    #[display(fmt = "Only pending leave requests can be approved")]
    InvalidStateTransition,

    #[display(fmt = "{}", _0)]
    Validation(#[error(not(source))] String),

    #[display(fmt = "Storage failure: {}", _0)]
    Store(StoreError),
}

impl From<StoreError> for LeaveError {
    fn from(err: StoreError) -> Self {
        LeaveError::Store(err)
    }
}

impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeaveError::NotFound(_) | LeaveError::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
            LeaveError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let LeaveError::Store(err) = self {
            tracing::error!(error = %err, "Store failure");
            return HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }));
        }

        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
