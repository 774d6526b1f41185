use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use super::Store;
use crate::model::employee::NewEmployee;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};

/// Seed file layout. Leave requests reference employees by position in the
/// `employees` array (1-based), matching the ids the store hands out.
#[derive(Debug, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
    #[serde(default)]
    pub leave_requests: Vec<SeedLeaveRequest>,
}

#[derive(Debug, Deserialize)]
pub struct SeedEmployee {
    pub full_name: String,
    pub department: String,
    pub joining_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct SeedLeaveRequest {
    pub employee_id: u64,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: LeaveStatus,
}

#[derive(Debug, Default)]
pub struct SeedSummary {
    pub employees: usize,
    pub leave_requests: usize,
}

/// Load a JSON seed file into the store. Seed rows are inserted as-is, no
/// policy checks; the file is trusted bootstrap data.
pub fn load_seed<S: Store>(store: &S, path: &str) -> Result<SeedSummary> {
    let file = File::open(path).with_context(|| format!("failed to open seed file {path}"))?;
    let data: SeedData = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse seed file {path}"))?;

    let mut summary = SeedSummary::default();

    for employee in data.employees {
        store
            .insert_employee(NewEmployee {
                full_name: employee.full_name,
                department: employee.department,
                joining_date: employee.joining_date,
            })
            .context("failed to seed employee")?;
        summary.employees += 1;
    }

    for leave in data.leave_requests {
        store
            .insert_leave(LeaveRequest {
                id: 0,
                employee_id: leave.employee_id,
                leave_type: leave.leave_type,
                start_date: leave.start_date,
                end_date: leave.end_date,
                status: leave.status,
                reason: leave.reason,
                created_at: Utc::now(),
            })
            .context("failed to seed leave request")?;
        summary.leave_requests += 1;
    }

    Ok(summary)
}
