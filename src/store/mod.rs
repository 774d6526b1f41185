pub mod memory;
pub mod seed;

use derive_more::{Display, Error};

use crate::config::Config;
use crate::model::employee::{Employee, NewEmployee};
use crate::model::leave_request::LeaveRequest;

pub use memory::MemoryStore;

/// Storage abstraction so the service layer can be exercised in isolation.
///
/// Implementations must serialize writes per employee; `MemoryStore` keeps a
/// single collection lock, which is stricter than required.
pub trait Store: Send + Sync {
    fn insert_employee(&self, new: NewEmployee) -> Result<Employee, StoreError>;
    fn employee(&self, id: u64) -> Result<Option<Employee>, StoreError>;
    fn employees(&self) -> Result<Vec<Employee>, StoreError>;

    /// Persist a new leave request. The `id` on the input is ignored; the
    /// store assigns the next identity and returns the stored record.
    fn insert_leave(&self, leave: LeaveRequest) -> Result<LeaveRequest, StoreError>;
    fn leave(&self, id: u64) -> Result<Option<LeaveRequest>, StoreError>;
    fn update_leave(&self, leave: LeaveRequest) -> Result<(), StoreError>;
    fn delete_leave(&self, id: u64) -> Result<(), StoreError>;
    fn leaves(&self) -> Result<Vec<LeaveRequest>, StoreError>;
    fn leaves_for_employee(&self, employee_id: u64) -> Result<Vec<LeaveRequest>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, Display, Error)]
pub enum StoreError {
    #[display(fmt = "record not found")]
    NotFound,
    #[display(fmt = "store unavailable: {}", _0)]
    Unavailable(#[error(not(source))] String),
}

/// Build the store and load optional seed data, mirroring the startup
/// warmups the service runs before accepting traffic.
pub fn init_store(config: &Config) -> anyhow::Result<MemoryStore> {
    let store = MemoryStore::new();

    if let Some(path) = &config.seed_path {
        let summary = seed::load_seed(&store, path)?;
        tracing::info!(
            employees = summary.employees,
            leave_requests = summary.leave_requests,
            path = %path,
            "Seed data loaded"
        );
    }

    Ok(store)
}
