//! Employee delivery performance.
//!
//! Every employee becomes one scatter point: delivered on the x axis,
//! not-delivered on the y axis, with the 1:1 line bound included so the
//! host can draw the break-even diagonal.

use serde::Serialize;

use ordersight_core::aggregate;

use crate::charts::ScatterPoint;
use crate::dataset::{Dataset, DatasetError, GroupBy};
use crate::types::EntityCandidate;

#[derive(Clone, Debug, Serialize)]
pub struct EmployeePerformance {
    pub employees: Vec<EntityCandidate>,
    pub scatter: Vec<ScatterPoint>,
    /// Upper bound for both axes, sized to the largest observed count.
    pub axis_max: u64,
}

pub fn run(dataset: &Dataset) -> Result<EmployeePerformance, DatasetError> {
    let facts = dataset.facts(GroupBy::Employee)?;
    let groups = aggregate(&facts);

    let employees: Vec<EntityCandidate> = groups
        .into_values()
        .map(EntityCandidate::from_aggregate)
        .collect();

    let axis_max = employees
        .iter()
        .map(|e| e.delivered.max(e.not_delivered))
        .max()
        .unwrap_or(0);

    Ok(EmployeePerformance {
        scatter: employees
            .iter()
            .map(|e| ScatterPoint {
                label: format!("Emp{}", e.entity_key),
                x: e.delivered as f64,
                y: e.not_delivered as f64,
            })
            .collect(),
        employees,
        axis_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, DatasetRow};

    fn row(employee: i64, delivered: u64, not_delivered: u64) -> DatasetRow {
        DatasetRow {
            period: None,
            client: None,
            employee: Some(employee),
            delivered,
            not_delivered,
        }
    }

    #[test]
    fn one_point_per_employee() {
        let dataset = Dataset::from_rows(vec![row(5, 10, 2), row(6, 3, 8), row(5, 5, 0)]);
        let section = run(&dataset).unwrap();
        assert_eq!(section.employees.len(), 2);

        let emp5 = section.scatter.iter().find(|p| p.label == "Emp5").unwrap();
        assert_eq!(emp5.x, 15.0);
        assert_eq!(emp5.y, 2.0);
        assert_eq!(section.axis_max, 15);
    }

    #[test]
    fn missing_employee_column_is_an_error() {
        let dataset = Dataset::from_rows(vec![DatasetRow {
            period: Some(1),
            client: None,
            employee: None,
            delivered: 1,
            not_delivered: 1,
        }]);
        assert!(matches!(
            run(&dataset),
            Err(DatasetError::MissingColumn {
                column: Column::Employee
            })
        ));
    }

    #[test]
    fn no_employees_yields_empty_scatter() {
        let dataset = Dataset::from_rows(vec![row(1, 0, 0)]);
        let section = run(&dataset).unwrap();
        assert_eq!(section.employees.len(), 1);
        assert_eq!(section.axis_max, 0);
    }
}
