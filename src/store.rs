use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::leave_request::{LeaveRequest, LeaveStatus};

/// Record shape handed to the store at creation time; the store assigns the
/// id.
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub employee_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
}

/// The durable-store seam. The workflow engine drives every operation
/// through this trait under a single lock, so implementations only need
/// plain indexed access: by request id, and by owning employee id.
pub trait LeaveStore {
    fn insert(&mut self, draft: NewLeaveRequest) -> LeaveRequest;
    fn get(&self, id: u64) -> Option<LeaveRequest>;
    fn set_status(&mut self, id: u64, status: LeaveStatus) -> Option<LeaveRequest>;
    /// Returns false if no request with this id existed.
    fn remove(&mut self, id: u64) -> bool;
    fn all(&self) -> Vec<LeaveRequest>;
    fn by_employee(&self, employee_id: u64) -> Vec<LeaveRequest>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    next_id: u64,
    requests: BTreeMap<u64, LeaveRequest>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            requests: BTreeMap::new(),
        }
    }
}

impl LeaveStore for MemoryStore {
    fn insert(&mut self, draft: NewLeaveRequest) -> LeaveRequest {
        self.next_id += 1;
        let record = LeaveRequest {
            id: self.next_id,
            employee_id: draft.employee_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            reason: draft.reason,
            status: draft.status,
        };
        self.requests.insert(record.id, record.clone());
        record
    }

    fn get(&self, id: u64) -> Option<LeaveRequest> {
        self.requests.get(&id).cloned()
    }

    fn set_status(&mut self, id: u64, status: LeaveStatus) -> Option<LeaveRequest> {
        let record = self.requests.get_mut(&id)?;
        record.status = status;
        Some(record.clone())
    }

    fn remove(&mut self, id: u64) -> bool {
        self.requests.remove(&id).is_some()
    }

    fn all(&self) -> Vec<LeaveRequest> {
        self.requests.values().cloned().collect()
    }

    fn by_employee(&self, employee_id: u64) -> Vec<LeaveRequest> {
        self.requests
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect()
    }
}
