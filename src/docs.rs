use utoipa::OpenApi;

use crate::api::employee::CreateEmployee;
use crate::api::leave_request::{LeaveFilter, LeaveListResponse, ReportQuery};
use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveStatus, LeaveType};
use crate::service::{LeaveReportRow, LeaveRequestView, NewLeaveRequest};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Management System API",
        version = "1.0.0",
        description = r#"
## Leave Management System (LMS)

This API manages employee leave requests for an organization.

### Key Features
- **Employee Management**
  - Create, list, and view employee profiles
- **Leave Management**
  - Submit, update, delete, and approve leave requests
  - Overlap, annual-quota, and sick-reason policy checks on every write
- **Search & Reporting**
  - Filtered, sorted, paginated leave listings
  - Yearly per-employee leave reports with department and date filters

### Response Format
- JSON-based RESTful responses
- Pagination supported for the filter endpoint

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::leave_list,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::filter_leaves,
        crate::api::leave_request::leave_report,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::update_leave,
        crate::api::leave_request::delete_leave,
        crate::api::leave_request::approve_leave,

        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees
    ),
    components(
        schemas(
            LeaveType,
            LeaveStatus,
            NewLeaveRequest,
            LeaveRequestView,
            LeaveFilter,
            LeaveListResponse,
            ReportQuery,
            LeaveReportRow,
            CreateEmployee,
            Employee
        )
    ),
    tags(
        (name = "Leave", description = "Leave management APIs"),
        (name = "Employee", description = "Employee management APIs"),
    )
)]
pub struct ApiDoc;
