use crate::api::leave_request::{
    CancelRequest, CreateLeaveRequest, LeaveListResponse, ListQuery, SetStatusRequest,
};
use crate::model::employee::Employee;
use crate::model::leave_request::LeaveRequest;
use crate::model::role::Role;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Request Workflow API",
        version = "1.0.0",
        description = r#"
## Leave-Request Approval Workflow

Employees submit time-off requests, managers approve or reject them, and a
small rule set governs validity and lifecycle.

### Rules enforced at creation
- `start_date <= end_date` (a single-day request is valid)
- `start_date` must not be before today
- the range must not overlap an already **Approved** request of the same employee
- requests longer than **15 days** (endpoints inclusive) are auto-rejected

### Manager actions
- set any request to `Approved` or `Rejected`, from any current status
  (including overriding an auto-rejection)
- permanently delete any request

### Employee actions
- cancel an own request while it is still `Pending`

Callers identify themselves by employee id; there is no session layer in
this service.

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::list_requests,
        crate::api::leave_request::get_request,
        crate::api::leave_request::create_request,
        crate::api::leave_request::set_status,
        crate::api::leave_request::cancel_request,
        crate::api::leave_request::delete_request,

        crate::api::employee::list_employees,
    ),
    components(
        schemas(
            CreateLeaveRequest,
            SetStatusRequest,
            CancelRequest,
            ListQuery,
            LeaveListResponse,
            LeaveRequest,
            Employee,
            Role
        )
    ),
    tags(
        (name = "LeaveRequests", description = "Leave request lifecycle APIs"),
        (name = "Employees", description = "Employee directory APIs"),
    )
)]
pub struct ApiDoc;
