use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveType};

/// Per-employee leave counts for one calendar year.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaveReportRow {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = 3)]
    pub total_leaves: usize,
    #[schema(example = 2)]
    pub annual_leaves: usize,
    #[schema(example = 1)]
    pub sick_leaves: usize,
}

/// Aggregate leave requests into one row per employee for the given year.
///
/// A request belongs to the year of its `start_date`. The optional department
/// and date bounds narrow the input before counting; employees with no
/// matching requests produce no row. Requests whose employee is missing from
/// `employees` are skipped. Rows come back in ascending employee id order.
pub fn leave_report(
    requests: &[LeaveRequest],
    employees: &[Employee],
    year: i32,
    department: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<LeaveReportRow> {
    let roster: BTreeMap<u64, &Employee> = employees
        .iter()
        .filter(|e| department.is_none_or(|d| e.department == d))
        .map(|e| (e.id, e))
        .collect();

    let mut rows: BTreeMap<u64, LeaveReportRow> = BTreeMap::new();

    for lr in requests {
        if lr.start_date.year() != year {
            continue;
        }
        if let Some(from) = from {
            if lr.start_date < from {
                continue;
            }
        }
        if let Some(to) = to {
            if lr.end_date > to {
                continue;
            }
        }
        let Some(employee) = roster.get(&lr.employee_id) else {
            continue;
        };

        let row = rows
            .entry(lr.employee_id)
            .or_insert_with(|| LeaveReportRow {
                employee_id: employee.id,
                full_name: employee.full_name.clone(),
                total_leaves: 0,
                annual_leaves: 0,
                sick_leaves: 0,
            });
        row.total_leaves += 1;
        match lr.leave_type {
            LeaveType::Annual => row.annual_leaves += 1,
            LeaveType::Sick => row.sick_leaves += 1,
            LeaveType::Other => {}
        }
    }

    rows.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave_request::LeaveStatus;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: u64, name: &str, department: &str) -> Employee {
        Employee {
            id,
            full_name: name.to_string(),
            department: department.to_string(),
            joining_date: date(2022, 1, 1),
        }
    }

    fn request(employee_id: u64, leave_type: LeaveType, start: NaiveDate) -> LeaveRequest {
        LeaveRequest {
            id: 0,
            employee_id,
            leave_type,
            start_date: start,
            end_date: start,
            status: LeaveStatus::Pending,
            reason: "reason".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn counts_split_by_leave_type() {
        let employees = vec![employee(1, "Jane Roe", "Engineering")];
        let requests = vec![
            request(1, LeaveType::Annual, date(2024, 3, 1)),
            request(1, LeaveType::Sick, date(2024, 7, 1)),
        ];
        let rows = leave_report(&requests, &employees, 2024, None, None, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_leaves, 2);
        assert_eq!(rows[0].annual_leaves, 1);
        assert_eq!(rows[0].sick_leaves, 1);
        assert_eq!(rows[0].full_name, "Jane Roe");
    }

    #[test]
    fn other_counts_toward_total_only() {
        let employees = vec![employee(1, "Jane Roe", "Engineering")];
        let requests = vec![request(1, LeaveType::Other, date(2024, 3, 1))];
        let rows = leave_report(&requests, &employees, 2024, None, None, None);
        assert_eq!(rows[0].total_leaves, 1);
        assert_eq!(rows[0].annual_leaves, 0);
        assert_eq!(rows[0].sick_leaves, 0);
    }

    #[test]
    fn year_comes_from_start_date() {
        let employees = vec![employee(1, "Jane Roe", "Engineering")];
        let mut spanning = request(1, LeaveType::Annual, date(2023, 12, 30));
        spanning.end_date = date(2024, 1, 2);
        let requests = vec![spanning, request(1, LeaveType::Sick, date(2024, 2, 1))];

        let rows = leave_report(&requests, &employees, 2024, None, None, None);
        assert_eq!(rows[0].total_leaves, 1);
        assert_eq!(rows[0].sick_leaves, 1);

        let rows = leave_report(&requests, &employees, 2023, None, None, None);
        assert_eq!(rows[0].total_leaves, 1);
        assert_eq!(rows[0].annual_leaves, 1);
    }

    #[test]
    fn department_filter_drops_other_departments() {
        let employees = vec![
            employee(1, "Jane Roe", "Engineering"),
            employee(2, "John Doe", "Sales"),
        ];
        let requests = vec![
            request(1, LeaveType::Annual, date(2024, 3, 1)),
            request(2, LeaveType::Annual, date(2024, 3, 1)),
        ];
        let rows = leave_report(&requests, &employees, 2024, Some("Sales"), None, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_id, 2);
    }

    #[test]
    fn date_bounds_narrow_the_window() {
        let employees = vec![employee(1, "Jane Roe", "Engineering")];
        let requests = vec![
            request(1, LeaveType::Annual, date(2024, 1, 5)),
            request(1, LeaveType::Annual, date(2024, 6, 5)),
            request(1, LeaveType::Annual, date(2024, 11, 5)),
        ];
        let rows = leave_report(
            &requests,
            &employees,
            2024,
            None,
            Some(date(2024, 3, 1)),
            Some(date(2024, 9, 1)),
        );
        assert_eq!(rows[0].total_leaves, 1);
    }

    #[test]
    fn employees_without_requests_are_omitted() {
        let employees = vec![
            employee(1, "Jane Roe", "Engineering"),
            employee(2, "John Doe", "Sales"),
        ];
        let requests = vec![request(1, LeaveType::Annual, date(2024, 3, 1))];
        let rows = leave_report(&requests, &employees, 2024, None, None, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_id, 1);
    }

    #[test]
    fn dangling_employee_references_are_skipped() {
        let employees = vec![employee(1, "Jane Roe", "Engineering")];
        let requests = vec![
            request(1, LeaveType::Annual, date(2024, 3, 1)),
            request(99, LeaveType::Annual, date(2024, 3, 1)),
        ];
        let rows = leave_report(&requests, &employees, 2024, None, None, None);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn rows_come_back_in_employee_id_order() {
        let employees = vec![
            employee(2, "John Doe", "Sales"),
            employee(1, "Jane Roe", "Engineering"),
        ];
        let requests = vec![
            request(2, LeaveType::Annual, date(2024, 3, 1)),
            request(1, LeaveType::Annual, date(2024, 4, 1)),
        ];
        let rows = leave_report(&requests, &employees, 2024, None, None, None);
        let ids: Vec<u64> = rows.iter().map(|r| r.employee_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
