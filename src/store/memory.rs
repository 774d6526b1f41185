use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{Store, StoreError};
use crate::model::employee::{Employee, NewEmployee};
use crate::model::leave_request::LeaveRequest;

/// In-memory reference implementation of [`Store`].
///
/// Records live in `BTreeMap`s so scans iterate in ascending id order, which
/// is the tie-break order the query engine documents for equal sort keys.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    employees: BTreeMap<u64, Employee>,
    leaves: BTreeMap<u64, LeaveRequest>,
    next_employee_id: u64,
    next_leave_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn insert_employee(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        let mut inner = self.write()?;
        inner.next_employee_id += 1;
        let employee = Employee {
            id: inner.next_employee_id,
            full_name: new.full_name,
            department: new.department,
            joining_date: new.joining_date,
        };
        inner.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    fn employee(&self, id: u64) -> Result<Option<Employee>, StoreError> {
        Ok(self.read()?.employees.get(&id).cloned())
    }

    fn employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.read()?.employees.values().cloned().collect())
    }

    fn insert_leave(&self, mut leave: LeaveRequest) -> Result<LeaveRequest, StoreError> {
        let mut inner = self.write()?;
        inner.next_leave_id += 1;
        leave.id = inner.next_leave_id;
        inner.leaves.insert(leave.id, leave.clone());
        Ok(leave)
    }

    fn leave(&self, id: u64) -> Result<Option<LeaveRequest>, StoreError> {
        Ok(self.read()?.leaves.get(&id).cloned())
    }

    fn update_leave(&self, leave: LeaveRequest) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if !inner.leaves.contains_key(&leave.id) {
            return Err(StoreError::NotFound);
        }
        inner.leaves.insert(leave.id, leave);
        Ok(())
    }

    fn delete_leave(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if inner.leaves.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn leaves(&self) -> Result<Vec<LeaveRequest>, StoreError> {
        Ok(self.read()?.leaves.values().cloned().collect())
    }

    fn leaves_for_employee(&self, employee_id: u64) -> Result<Vec<LeaveRequest>, StoreError> {
        Ok(self
            .read()?
            .leaves
            .values()
            .filter(|lr| lr.employee_id == employee_id)
            .cloned()
            .collect())
    }
}
