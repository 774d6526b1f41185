use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::LeaveError;
use crate::model::employee::{Employee, NewEmployee};
use crate::service::LeaveService;
use crate::store::MemoryStore;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "2022-03-01", format = "date", value_type = String)]
    pub joining_date: NaiveDate,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    service: web::Data<LeaveService<MemoryStore>>,
    payload: web::Json<CreateEmployee>,
) -> Result<impl Responder, LeaveError> {
    let payload = payload.into_inner();
    let employee = service.create_employee(NewEmployee {
        full_name: payload.full_name,
        department: payload.department,
        joining_date: payload.joining_date,
    })?;
    Ok(HttpResponse::Created().json(employee))
}

/// Get one employee by id
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(
        ("id" = u64, Path, description = "ID of the employee to fetch")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee 7 not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    service: web::Data<LeaveService<MemoryStore>>,
    path: web::Path<u64>,
) -> Result<impl Responder, LeaveError> {
    let employee = service.get_employee(path.into_inner())?;
    Ok(HttpResponse::Ok().json(employee))
}

/// List all employees
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses(
        (status = 200, description = "Employee list", body = Vec<Employee>)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    service: web::Data<LeaveService<MemoryStore>>,
) -> Result<impl Responder, LeaveError> {
    let employees = service.list_employees()?;
    Ok(HttpResponse::Ok().json(employees))
}
