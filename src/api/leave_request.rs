use std::str::FromStr;

use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::LeaveService;
use crate::error::WorkflowError;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};

#[derive(Deserialize, ToSchema)]
pub struct CreateLeaveRequest {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "2026-06-01", format = "date", value_type = String)]
    pub start_date: chrono::NaiveDate,
    #[schema(example = "2026-06-05", format = "date", value_type = String)]
    pub end_date: chrono::NaiveDate,
    #[schema(example = "family trip")]
    pub reason: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SetStatusRequest {
    /// Must resolve to a Manager.
    #[schema(example = 3)]
    pub actor_id: u64,
    /// "Approved" or "Rejected", matching the enum variant name.
    #[schema(example = "Approved")]
    pub status: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CancelRequest {
    /// Must be the owner of the request.
    #[schema(example = 1)]
    pub employee_id: u64,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ListQuery {
    /// Identity of the caller; managers see everything, employees only
    /// their own requests. Requests without it are denied.
    #[schema(example = 1)]
    pub caller_id: Option<u64>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct DeleteQuery {
    /// Must resolve to a Manager.
    #[schema(example = 3)]
    pub manager_id: u64,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub total: usize,
}

/* =========================
List leave requests
========================= */
#[utoipa::path(
    get,
    path = "/api/LeaveRequests",
    params(ListQuery),
    responses(
        (status = 200, description = "Leave requests visible to the caller, newest start date first", body = LeaveListResponse),
        (status = 403, description = "Caller identity missing or unknown")
    ),
    tag = "LeaveRequests"
)]
pub async fn list_requests(
    service: web::Data<LeaveService>,
    query: web::Query<ListQuery>,
) -> actix_web::Result<impl Responder> {
    let data = service.list(query.caller_id)?;
    let total = data.len();
    Ok(HttpResponse::Ok().json(LeaveListResponse { data, total }))
}

/* =========================
Fetch one leave request
========================= */
#[utoipa::path(
    get,
    path = "/api/LeaveRequests/{id}",
    params(("id" = u64, Path, description = "Leave request id")),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 404, description = "Leave request not found")
    ),
    tag = "LeaveRequests"
)]
pub async fn get_request(
    service: web::Data<LeaveService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let record = service.get(path.into_inner())?;
    Ok(HttpResponse::Ok().json(record))
}

/* =========================
Create leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/LeaveRequests",
    request_body(
        content = CreateLeaveRequest,
        description = "Leave request payload; dates are inclusive calendar days",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Request stored; status is Pending, or Rejected when longer than 15 days", body = LeaveRequest),
        (status = 400, description = "Reversed range or start date in the past"),
        (status = 404, description = "Unknown employee"),
        (status = 409, description = "Range overlaps approved leave")
    ),
    tag = "LeaveRequests"
)]
pub async fn create_request(
    service: web::Data<LeaveService>,
    payload: web::Json<CreateLeaveRequest>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let record = service.create(
        payload.employee_id,
        payload.start_date,
        payload.end_date,
        payload.reason,
        Utc::now().date_naive(),
    )?;
    Ok(HttpResponse::Created().json(record))
}

/* =========================
Approve / reject (manager)
========================= */
#[utoipa::path(
    put,
    path = "/api/LeaveRequests/{id}/status",
    params(("id" = u64, Path, description = "Leave request id")),
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Status set, any previous status overridden", body = LeaveRequest),
        (status = 400, description = "Unrecognized status value"),
        (status = 403, description = "Actor is not a manager"),
        (status = 404, description = "Leave request not found")
    ),
    tag = "LeaveRequests"
)]
pub async fn set_status(
    service: web::Data<LeaveService>,
    path: web::Path<u64>,
    payload: web::Json<SetStatusRequest>,
) -> actix_web::Result<impl Responder> {
    let target = LeaveStatus::from_str(&payload.status)
        .map_err(|_| WorkflowError::InvalidStatus(payload.status.clone()))?;
    let record = service.set_status(path.into_inner(), payload.actor_id, target)?;
    Ok(HttpResponse::Ok().json(record))
}

/* =========================
Cancel (owning employee)
========================= */
#[utoipa::path(
    post,
    path = "/api/LeaveRequests/{id}/cancel",
    params(("id" = u64, Path, description = "Leave request id")),
    request_body = CancelRequest,
    responses(
        (status = 200, description = "Pending request removed", body = Object, example = json!({
            "message": "Leave request cancelled"
        })),
        (status = 403, description = "Not the owner, or no such request"),
        (status = 409, description = "Request is no longer pending")
    ),
    tag = "LeaveRequests"
)]
pub async fn cancel_request(
    service: web::Data<LeaveService>,
    path: web::Path<u64>,
    payload: web::Json<CancelRequest>,
) -> actix_web::Result<impl Responder> {
    service.cancel(path.into_inner(), payload.employee_id)?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave request cancelled"
    })))
}

/* =========================
Permanent delete (manager)
========================= */
#[utoipa::path(
    delete,
    path = "/api/LeaveRequests/{id}",
    params(
        ("id" = u64, Path, description = "Leave request id"),
        DeleteQuery
    ),
    responses(
        (status = 200, description = "Request removed regardless of status", body = Object, example = json!({
            "message": "Leave request deleted"
        })),
        (status = 403, description = "Caller is not a manager"),
        (status = 404, description = "Leave request not found")
    ),
    tag = "LeaveRequests"
)]
pub async fn delete_request(
    service: web::Data<LeaveService>,
    path: web::Path<u64>,
    query: web::Query<DeleteQuery>,
) -> actix_web::Result<impl Responder> {
    service.delete(path.into_inner(), query.manager_id)?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave request deleted"
    })))
}
