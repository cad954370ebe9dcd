use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::directory::Directory;
use crate::error::WorkflowError;
use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, duration_days};
use crate::store::{LeaveStore, NewLeaveRequest};

/// Requests longer than this many days (inclusive of both endpoints) are
/// rejected at creation without manager involvement.
pub const AUTO_REJECT_THRESHOLD_DAYS: i64 = 15;

/// Leave-request lifecycle engine. Holds the store behind a mutex and runs
/// every operation as read-validate-write under one guard, so two
/// overlapping creations for the same employee can never both pass the
/// overlap check.
pub struct Workflow<S, D> {
    store: Mutex<S>,
    directory: D,
}

impl<S: LeaveStore, D: Directory> Workflow<S, D> {
    pub fn new(store: S, directory: D) -> Self {
        Self {
            store: Mutex::new(store),
            directory,
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    fn store(&self) -> MutexGuard<'_, S> {
        // A poisoned lock only means a panic elsewhere; the store itself is
        // still consistent because each operation writes at most one record.
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn require_manager(&self, actor_id: u64) -> Result<&Employee, WorkflowError> {
        match self.directory.resolve(actor_id) {
            Some(actor) if actor.role.is_manager() => Ok(actor),
            Some(_) | None => Err(WorkflowError::Unauthorized),
        }
    }

    /// Creates a request for `employee_id`. The initial status is decided
    /// here: anything longer than [`AUTO_REJECT_THRESHOLD_DAYS`] comes back
    /// `Rejected` without a manager ever seeing it, everything else starts
    /// `Pending`. `today` is the calendar date the past-date rule is judged
    /// against; callers pass the current date, tests pin it.
    pub fn create(
        &self,
        employee_id: u64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: String,
        today: NaiveDate,
    ) -> Result<LeaveRequest, WorkflowError> {
        self.directory
            .resolve(employee_id)
            .ok_or(WorkflowError::NotFound)?;

        if start_date > end_date {
            return Err(WorkflowError::InvalidRange);
        }
        if start_date < today {
            return Err(WorkflowError::PastDate);
        }

        let duration = duration_days(start_date, end_date);

        let mut store = self.store();
        let conflict = store
            .by_employee(employee_id)
            .iter()
            .any(|r| r.status == LeaveStatus::Approved && r.overlaps(start_date, end_date));
        if conflict {
            return Err(WorkflowError::OverlapConflict);
        }

        let status = if duration > AUTO_REJECT_THRESHOLD_DAYS {
            warn!(employee_id, duration, "Auto-rejecting over-length leave request");
            LeaveStatus::Rejected
        } else {
            LeaveStatus::Pending
        };

        let record = store.insert(NewLeaveRequest {
            employee_id,
            start_date,
            end_date,
            reason,
            status,
        });
        info!(id = record.id, employee_id, %status, "Created leave request");
        Ok(record)
    }

    /// Manager-only status override. Permitted from any current status to
    /// `Approved` or `Rejected`, including re-approving an auto-rejected
    /// request; overlap and duration are checked at creation only.
    pub fn set_status(
        &self,
        id: u64,
        actor_id: u64,
        target: LeaveStatus,
    ) -> Result<LeaveRequest, WorkflowError> {
        if target == LeaveStatus::Pending {
            return Err(WorkflowError::InvalidStatus(target.to_string()));
        }
        self.require_manager(actor_id)?;
        let updated = self
            .store()
            .set_status(id, target)
            .ok_or(WorkflowError::NotFound)?;
        info!(id, actor_id, status = %target, "Manager set leave request status");
        Ok(updated)
    }

    /// Employee-initiated removal of an own, still-pending request. A
    /// missing request and someone else's request fail identically, so the
    /// caller learns nothing about other employees' records.
    pub fn cancel(&self, id: u64, employee_id: u64) -> Result<(), WorkflowError> {
        let mut store = self.store();
        let request = match store.get(id) {
            Some(r) if r.employee_id == employee_id => r,
            Some(_) | None => return Err(WorkflowError::Unauthorized),
        };
        if request.status != LeaveStatus::Pending {
            return Err(WorkflowError::InvalidState);
        }
        store.remove(id);
        info!(id, employee_id, "Employee cancelled leave request");
        Ok(())
    }

    /// Manager-initiated permanent removal, regardless of status.
    pub fn delete(&self, id: u64, manager_id: u64) -> Result<(), WorkflowError> {
        self.require_manager(manager_id)?;
        let mut store = self.store();
        if !store.remove(id) {
            return Err(WorkflowError::NotFound);
        }
        info!(id, manager_id, "Manager deleted leave request");
        Ok(())
    }

    pub fn get(&self, id: u64) -> Result<LeaveRequest, WorkflowError> {
        self.store().get(id).ok_or(WorkflowError::NotFound)
    }

    /// Role-scoped listing, newest start date first. An absent caller id
    /// fails closed rather than granting the source's implicit manager view.
    pub fn list(&self, caller_id: Option<u64>) -> Result<Vec<LeaveRequest>, WorkflowError> {
        let caller_id = caller_id.ok_or(WorkflowError::Unauthorized)?;
        let caller = self
            .directory
            .resolve(caller_id)
            .ok_or(WorkflowError::Unauthorized)?;

        let store = self.store();
        let mut requests = if caller.role.is_manager() {
            store.all()
        } else {
            store.by_employee(caller_id)
        };
        requests.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(requests)
    }
}
