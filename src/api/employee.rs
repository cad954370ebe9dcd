use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::LeaveService;
use crate::directory::Directory;
use crate::model::employee::Employee;

#[derive(Deserialize, IntoParams)]
pub struct EmployeeQuery {
    /// Optional exact-match filter on the email lookup key.
    pub email: Option<String>,
}

/// Roster lookup. The directory is read-only in this service; employees are
/// provisioned out of band.
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employee roster", body = [Employee]),
        (status = 404, description = "No employee with that email")
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    service: web::Data<LeaveService>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let directory = service.directory();
    if let Some(email) = query.email.as_deref() {
        return Ok(match directory.find_by_email(email) {
            Some(employee) => HttpResponse::Ok().json(std::slice::from_ref(employee)),
            None => HttpResponse::NotFound().json(json!({
                "message": "employee or leave request not found"
            })),
        });
    }
    Ok(HttpResponse::Ok().json(directory.all()))
}
