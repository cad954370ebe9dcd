use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Wire representation is the exact variant name ("Pending", "Approved",
/// "Rejected"), both in JSON bodies and in the status strings of the
/// set-status endpoint.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 1,
        "start_date": "2026-06-01",
        "end_date": "2026-06-05",
        "reason": "family trip",
        "status": "Pending"
    })
)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "2026-06-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-06-05", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "family trip")]
    pub reason: String,
    #[schema(example = "Pending", value_type = String)]
    pub status: LeaveStatus,
}

impl LeaveRequest {
    /// Closed-interval length in days; a request spanning a single day
    /// counts as 1.
    pub fn duration_days(&self) -> i64 {
        duration_days(self.start_date, self.end_date)
    }

    /// Closed-interval intersection with another date range. Sharing a
    /// single day counts as overlap.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }
}

pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
