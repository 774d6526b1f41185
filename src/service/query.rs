use chrono::NaiveDate;
use strum_macros::{Display, EnumString};

use crate::error::LeaveError;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};

/// Conjunctive filter criteria; absent fields impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct LeaveCriteria {
    pub employee_id: Option<u64>,
    pub leave_type: Option<LeaveType>,
    pub status: Option<LeaveStatus>,
    /// Lower bound on `start_date`.
    pub start_from: Option<NaiveDate>,
    /// Upper bound on `end_date`.
    pub end_until: Option<NaiveDate>,
    /// Case-sensitive substring match on `reason`; blank means absent.
    pub keyword: Option<String>,
}

impl LeaveCriteria {
    fn matches(&self, lr: &LeaveRequest) -> bool {
        if let Some(id) = self.employee_id {
            if lr.employee_id != id {
                return false;
            }
        }
        if let Some(leave_type) = self.leave_type {
            if lr.leave_type != leave_type {
                return false;
            }
        }
        if let Some(status) = self.status {
            if lr.status != status {
                return false;
            }
        }
        if let Some(from) = self.start_from {
            if lr.start_date < from {
                return false;
            }
        }
        if let Some(until) = self.end_until {
            if lr.end_date > until {
                return false;
            }
        }
        match self.keyword.as_deref() {
            Some(keyword) if !keyword.trim().is_empty() => lr.reason.contains(keyword),
            _ => true,
        }
    }
}

/// Closed sort-field set. Unrecognized transport values fall back to the
/// default instead of dispatching on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SortField {
    #[default]
    StartDate,
    EndDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortField {
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl SortOrder {
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

/// 1-indexed pagination plus resolved sort settings.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Filter, sort, and paginate the given requests. Returns the page slice and
/// the total match count before pagination.
///
/// The sort is stable, so records with equal keys keep store iteration
/// order; that tie order is not specified across store implementations.
pub fn filter_requests(
    rows: Vec<LeaveRequest>,
    criteria: &LeaveCriteria,
    page: &PageRequest,
) -> Result<(Vec<LeaveRequest>, usize), LeaveError> {
    if page.page < 1 {
        return Err(LeaveError::Validation("page must be at least 1".into()));
    }
    if page.per_page < 1 {
        return Err(LeaveError::Validation("per_page must be at least 1".into()));
    }

    let mut matches: Vec<LeaveRequest> = rows.into_iter().filter(|lr| criteria.matches(lr)).collect();

    match (page.sort_by, page.sort_order) {
        (SortField::StartDate, SortOrder::Asc) => {
            matches.sort_by(|a, b| a.start_date.cmp(&b.start_date))
        }
        (SortField::StartDate, SortOrder::Desc) => {
            matches.sort_by(|a, b| b.start_date.cmp(&a.start_date))
        }
        (SortField::EndDate, SortOrder::Asc) => matches.sort_by(|a, b| a.end_date.cmp(&b.end_date)),
        (SortField::EndDate, SortOrder::Desc) => {
            matches.sort_by(|a, b| b.end_date.cmp(&a.end_date))
        }
    }

    let total = matches.len();
    let offset = (page.page - 1).saturating_mul(page.per_page) as usize;
    let items = matches
        .into_iter()
        .skip(offset)
        .take(page.per_page as usize)
        .collect();

    Ok((items, total))
}
