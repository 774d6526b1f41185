pub mod policy;
pub mod query;
pub mod report;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::LeaveError;
use crate::model::employee::{Employee, NewEmployee};
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};
use crate::store::{Store, StoreError};

pub use query::{LeaveCriteria, PageRequest, SortField, SortOrder};
pub use report::LeaveReportRow;

/// Caller-supplied fields for a new or replacement leave request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewLeaveRequest {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "annual")]
    pub leave_type: LeaveType,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[serde(default)]
    #[schema(example = "family trip")]
    pub reason: String,
}

/// Leave request as returned to API callers, with the employee name joined
/// in. `employee_name` is `None` when the referenced employee no longer
/// exists.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaveRequestView {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "John Doe")]
    pub employee_name: Option<String>,
    #[schema(example = "annual")]
    pub leave_type: LeaveType,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "pending")]
    pub status: LeaveStatus,
    #[schema(example = "family trip")]
    pub reason: String,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: chrono::DateTime<Utc>,
}

impl LeaveRequestView {
    fn from_record(lr: LeaveRequest, employee_name: Option<String>) -> Self {
        Self {
            id: lr.id,
            employee_id: lr.employee_id,
            employee_name,
            leave_type: lr.leave_type,
            start_date: lr.start_date,
            end_date: lr.end_date,
            status: lr.status,
            reason: lr.reason,
            created_at: lr.created_at,
        }
    }
}

/// Orchestrates validation and persistence for leave requests.
///
/// Writes touching one employee's requests are serialized through a
/// per-employee mutex so the read-validate-write sequence cannot interleave
/// with a concurrent write for the same employee and admit an overlap or a
/// quota breach.
pub struct LeaveService<S> {
    store: Arc<S>,
    employee_locks: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
}

impl<S: Store> LeaveService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            employee_locks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_handle(&self, employee_id: u64) -> Arc<Mutex<()>> {
        let mut locks = self
            .employee_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(employee_id).or_default())
    }

    fn guard(handle: &Arc<Mutex<()>>) -> MutexGuard<'_, ()> {
        // The guarded unit carries no data, so a poisoned lock is still usable.
        handle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn require_employee(&self, id: u64) -> Result<Employee, LeaveError> {
        self.store
            .employee(id)?
            .ok_or(LeaveError::EmployeeNotFound(id))
    }

    fn check_dates(start: NaiveDate, end: NaiveDate) -> Result<(), LeaveError> {
        if end < start {
            return Err(LeaveError::Validation(
                "end_date must not precede start_date".into(),
            ));
        }
        Ok(())
    }

    fn employee_names(&self) -> Result<BTreeMap<u64, String>, LeaveError> {
        Ok(self
            .store
            .employees()?
            .into_iter()
            .map(|e| (e.id, e.full_name))
            .collect())
    }

    fn view(&self, lr: LeaveRequest) -> Result<LeaveRequestView, LeaveError> {
        let name = self.store.employee(lr.employee_id)?.map(|e| e.full_name);
        Ok(LeaveRequestView::from_record(lr, name))
    }

    pub fn create_leave(&self, new: NewLeaveRequest) -> Result<LeaveRequestView, LeaveError> {
        Self::check_dates(new.start_date, new.end_date)?;
        self.require_employee(new.employee_id)?;

        let handle = self.lock_handle(new.employee_id);
        let _guard = Self::guard(&handle);

        let existing = self.store.leaves_for_employee(new.employee_id)?;
        let candidate = LeaveRequest {
            id: 0,
            employee_id: new.employee_id,
            leave_type: new.leave_type,
            start_date: new.start_date,
            end_date: new.end_date,
            status: LeaveStatus::Pending,
            reason: new.reason,
            created_at: Utc::now(),
        };
        policy::validate(&candidate, &existing)?;

        let stored = self.store.insert_leave(candidate)?;
        self.view(stored)
    }

    /// Replace the caller-supplied fields of an existing request. Status and
    /// creation time are preserved; the replacement passes the same policy
    /// checks as a create, with the request's own record excluded.
    pub fn update_leave(
        &self,
        id: u64,
        new: NewLeaveRequest,
    ) -> Result<LeaveRequestView, LeaveError> {
        Self::check_dates(new.start_date, new.end_date)?;
        let current = self.store.leave(id)?.ok_or(LeaveError::NotFound(id))?;
        self.require_employee(new.employee_id)?;

        // The request may move between employees; take both locks in
        // ascending id order so concurrent movers cannot deadlock.
        let mut ids = vec![current.employee_id, new.employee_id];
        ids.sort_unstable();
        ids.dedup();
        let handles: Vec<_> = ids.iter().map(|&eid| self.lock_handle(eid)).collect();
        let _guards: Vec<_> = handles.iter().map(Self::guard).collect();

        let current = self.store.leave(id)?.ok_or(LeaveError::NotFound(id))?;
        let existing: Vec<LeaveRequest> = self
            .store
            .leaves_for_employee(new.employee_id)?
            .into_iter()
            .filter(|lr| lr.id != id)
            .collect();

        let candidate = LeaveRequest {
            id,
            employee_id: new.employee_id,
            leave_type: new.leave_type,
            start_date: new.start_date,
            end_date: new.end_date,
            status: current.status,
            reason: new.reason,
            created_at: current.created_at,
        };
        policy::validate(&candidate, &existing)?;

        match self.store.update_leave(candidate.clone()) {
            Ok(()) => self.view(candidate),
            Err(StoreError::NotFound) => Err(LeaveError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    pub fn delete_leave(&self, id: u64) -> Result<(), LeaveError> {
        let current = self.store.leave(id)?.ok_or(LeaveError::NotFound(id))?;

        let handle = self.lock_handle(current.employee_id);
        let _guard = Self::guard(&handle);

        match self.store.delete_leave(id) {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound) => Err(LeaveError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Move a pending request to approved. Any other current status is
    /// rejected rather than silently overwritten.
    pub fn approve_leave(&self, id: u64) -> Result<LeaveRequestView, LeaveError> {
        let current = self.store.leave(id)?.ok_or(LeaveError::NotFound(id))?;

        let handle = self.lock_handle(current.employee_id);
        let _guard = Self::guard(&handle);

        let mut current = self.store.leave(id)?.ok_or(LeaveError::NotFound(id))?;
        if current.status != LeaveStatus::Pending {
            return Err(LeaveError::InvalidStateTransition);
        }
        current.status = LeaveStatus::Approved;

        match self.store.update_leave(current.clone()) {
            Ok(()) => self.view(current),
            Err(StoreError::NotFound) => Err(LeaveError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    pub fn get_leave(&self, id: u64) -> Result<LeaveRequestView, LeaveError> {
        let lr = self.store.leave(id)?.ok_or(LeaveError::NotFound(id))?;
        self.view(lr)
    }

    pub fn list_leaves(&self) -> Result<Vec<LeaveRequestView>, LeaveError> {
        let names = self.employee_names()?;
        Ok(self
            .store
            .leaves()?
            .into_iter()
            .map(|lr| {
                let name = names.get(&lr.employee_id).cloned();
                LeaveRequestView::from_record(lr, name)
            })
            .collect())
    }

    /// Filtered, sorted, paginated listing. Returns the page of views and
    /// the total match count before pagination.
    pub fn filter_leaves(
        &self,
        criteria: &LeaveCriteria,
        page: &PageRequest,
    ) -> Result<(Vec<LeaveRequestView>, usize), LeaveError> {
        let rows = self.store.leaves()?;
        let (items, total) = query::filter_requests(rows, criteria, page)?;
        let names = self.employee_names()?;
        let views = items
            .into_iter()
            .map(|lr| {
                let name = names.get(&lr.employee_id).cloned();
                LeaveRequestView::from_record(lr, name)
            })
            .collect();
        Ok((views, total))
    }

    pub fn leave_report(
        &self,
        year: i32,
        department: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<LeaveReportRow>, LeaveError> {
        let requests = self.store.leaves()?;
        let employees = self.store.employees()?;
        Ok(report::leave_report(
            &requests, &employees, year, department, from, to,
        ))
    }

    pub fn create_employee(&self, new: NewEmployee) -> Result<Employee, LeaveError> {
        Ok(self.store.insert_employee(new)?)
    }

    pub fn get_employee(&self, id: u64) -> Result<Employee, LeaveError> {
        self.require_employee(id)
    }

    pub fn list_employees(&self) -> Result<Vec<Employee>, LeaveError> {
        Ok(self.store.employees()?)
    }
}
