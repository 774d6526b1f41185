use chrono::Datelike;

use crate::error::LeaveError;
use crate::model::leave_request::{LeaveRequest, LeaveType};

/// Maximum annual-leave days per employee per calendar year, keyed by the
/// request's start-date year.
pub const ANNUAL_QUOTA_DAYS: i64 = 20;

/// Validate a candidate request against the employee's existing requests.
///
/// `existing` must already be scoped to the candidate's employee and, for
/// updates, must exclude the candidate's own id. Rules run in order and the
/// first failure wins; the check has no side effects and is identical for
/// create and update.
pub fn validate(candidate: &LeaveRequest, existing: &[LeaveRequest]) -> Result<(), LeaveError> {
    if existing
        .iter()
        .any(|lr| lr.overlaps(candidate.start_date, candidate.end_date))
    {
        return Err(LeaveError::Overlap);
    }

    if candidate.leave_type == LeaveType::Annual {
        let year = candidate.start_date.year();
        let taken: i64 = existing
            .iter()
            .filter(|lr| lr.leave_type == LeaveType::Annual && lr.start_date.year() == year)
            .map(LeaveRequest::span_days)
            .sum();
        if taken + candidate.span_days() > ANNUAL_QUOTA_DAYS {
            return Err(LeaveError::AnnualQuotaExceeded);
        }
    }

    if candidate.leave_type == LeaveType::Sick && candidate.reason.trim().is_empty() {
        return Err(LeaveError::MissingReason);
    }

    Ok(())
}
