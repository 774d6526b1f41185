use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::Config;
use crate::error::LeaveError;
use crate::model::leave_request::{LeaveStatus, LeaveType};
use crate::service::{
    LeaveCriteria, LeaveReportRow, LeaveRequestView, LeaveService, NewLeaveRequest, PageRequest,
    SortField, SortOrder,
};
use crate::store::MemoryStore;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    #[schema(example = 1)]
    /// Filter by employee ID
    pub employee_id: Option<u64>,
    #[schema(example = "annual")]
    /// Filter by leave type
    pub leave_type: Option<String>,
    #[schema(example = "pending")]
    /// Filter by leave status
    pub status: Option<String>,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    /// Keep requests starting on or after this date
    pub start_date: Option<NaiveDate>,
    #[schema(example = "2026-12-31", format = "date", value_type = String)]
    /// Keep requests ending on or before this date
    pub end_date: Option<NaiveDate>,
    #[schema(example = "trip")]
    /// Substring match on the reason text
    pub keyword: Option<String>,
    #[schema(example = "startdate")]
    /// Sort field, startdate or enddate; unknown values sort by start date
    pub sort_by: Option<String>,
    #[schema(example = "asc")]
    /// Sort direction, asc or desc; unknown values sort ascending
    pub sort_order: Option<String>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u64>,
    #[schema(example = 10)]
    /// Pagination per page number
    pub per_page: Option<u64>,
}

impl LeaveFilter {
    fn criteria(&self) -> Result<LeaveCriteria, LeaveError> {
        let leave_type = self
            .leave_type
            .as_deref()
            .map(|raw| {
                raw.parse::<LeaveType>()
                    .map_err(|_| LeaveError::Validation(format!("unknown leave type: {raw}")))
            })
            .transpose()?;
        let status = self
            .status
            .as_deref()
            .map(|raw| {
                raw.parse::<LeaveStatus>()
                    .map_err(|_| LeaveError::Validation(format!("unknown leave status: {raw}")))
            })
            .transpose()?;

        Ok(LeaveCriteria {
            employee_id: self.employee_id,
            leave_type,
            status,
            start_from: self.start_date,
            end_until: self.end_date,
            keyword: self.keyword.clone(),
        })
    }

    fn page_request(&self, max_per_page: u64) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page).min(max_per_page),
            sort_by: self
                .sort_by
                .as_deref()
                .map(SortField::parse_or_default)
                .unwrap_or_default(),
            sort_order: self
                .sort_order
                .as_deref()
                .map(SortOrder::parse_or_default)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequestView>,
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 10)]
    pub per_page: u64,
    #[schema(example = 1)]
    pub total: usize,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    #[schema(example = 2026)]
    /// Calendar year of the report, matched on start dates
    pub year: i32,
    #[schema(example = "Engineering")]
    /// Restrict the report to one department
    pub department: Option<String>,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    /// Keep requests starting on or after this date
    pub from: Option<NaiveDate>,
    #[schema(example = "2026-12-31", format = "date", value_type = String)]
    /// Keep requests ending on or before this date
    pub to: Option<NaiveDate>,
}

/// List every leave request
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    responses(
        (status = 200, description = "All leave requests", body = Vec<LeaveRequestView>)
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    service: web::Data<LeaveService<MemoryStore>>,
) -> Result<impl Responder, LeaveError> {
    let views = service.list_leaves()?;
    Ok(HttpResponse::Ok().json(views))
}

/// Submit a leave request
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = NewLeaveRequest,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = LeaveRequestView),
        (status = 400, description = "Policy violation", body = Object, example = json!({
            "message": "Leave dates overlap an existing request for this employee"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    service: web::Data<LeaveService<MemoryStore>>,
    payload: web::Json<NewLeaveRequest>,
) -> Result<impl Responder, LeaveError> {
    let view = service.create_leave(payload.into_inner())?;
    Ok(HttpResponse::Created().json(view))
}

/// Filtered, sorted, paginated leave listing
#[utoipa::path(
    get,
    path = "/api/v1/leave/filter",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list", body = LeaveListResponse),
        (status = 400, description = "Bad filter or pagination values")
    ),
    tag = "Leave"
)]
pub async fn filter_leaves(
    service: web::Data<LeaveService<MemoryStore>>,
    config: web::Data<Config>,
    query: web::Query<LeaveFilter>,
) -> Result<impl Responder, LeaveError> {
    let criteria = query.criteria()?;
    let page = query.page_request(config.max_per_page);
    let (data, total) = service.filter_leaves(&criteria, &page)?;
    Ok(HttpResponse::Ok().json(LeaveListResponse {
        data,
        page: page.page,
        per_page: page.per_page,
        total,
    }))
}

/// Yearly per-employee leave counts
#[utoipa::path(
    get,
    path = "/api/v1/leave/report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Report rows, one per employee", body = Vec<LeaveReportRow>)
    ),
    tag = "Leave"
)]
pub async fn leave_report(
    service: web::Data<LeaveService<MemoryStore>>,
    query: web::Query<ReportQuery>,
) -> Result<impl Responder, LeaveError> {
    let rows = service.leave_report(
        query.year,
        query.department.as_deref(),
        query.from,
        query.to,
    )?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Fetch one leave request
#[utoipa::path(
    get,
    path = "/api/v1/leave/{id}",
    params(
        ("id" = u64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequestView),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request 7 not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    service: web::Data<LeaveService<MemoryStore>>,
    path: web::Path<u64>,
) -> Result<impl Responder, LeaveError> {
    let view = service.get_leave(path.into_inner())?;
    Ok(HttpResponse::Ok().json(view))
}

/// Replace a leave request
#[utoipa::path(
    put,
    path = "/api/v1/leave/{id}",
    params(
        ("id" = u64, Path, description = "ID of the leave request to update")
    ),
    request_body = NewLeaveRequest,
    responses(
        (status = 200, description = "Leave request updated", body = LeaveRequestView),
        (status = 400, description = "Policy violation"),
        (status = 404, description = "Leave request or employee not found")
    ),
    tag = "Leave"
)]
pub async fn update_leave(
    service: web::Data<LeaveService<MemoryStore>>,
    path: web::Path<u64>,
    payload: web::Json<NewLeaveRequest>,
) -> Result<impl Responder, LeaveError> {
    let view = service.update_leave(path.into_inner(), payload.into_inner())?;
    Ok(HttpResponse::Ok().json(view))
}

/// Delete a leave request
#[utoipa::path(
    delete,
    path = "/api/v1/leave/{id}",
    params(
        ("id" = u64, Path, description = "ID of the leave request to delete")
    ),
    responses(
        (status = 204, description = "Leave request deleted"),
        (status = 404, description = "Leave request not found")
    ),
    tag = "Leave"
)]
pub async fn delete_leave(
    service: web::Data<LeaveService<MemoryStore>>,
    path: web::Path<u64>,
) -> Result<impl Responder, LeaveError> {
    service.delete_leave(path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

/// Approve a pending leave request
#[utoipa::path(
    put,
    path = "/api/v1/leave/{id}/approve",
    params(
        ("id" = u64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved", body = LeaveRequestView),
        (status = 400, description = "Request is not pending", body = Object, example = json!({
            "message": "Only pending leave requests can be approved"
        })),
        (status = 404, description = "Leave request not found")
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    service: web::Data<LeaveService<MemoryStore>>,
    path: web::Path<u64>,
) -> Result<impl Responder, LeaveError> {
    let view = service.approve_leave(path.into_inner())?;
    Ok(HttpResponse::Ok().json(view))
}
