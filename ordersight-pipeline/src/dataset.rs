//! The externally supplied fact table.
//!
//! The hosting tool hands over a tabular dataset whose columns vary with
//! what the user bound to the panel. The two count columns are required;
//! the three entity-key columns are optional and gate which analyses run.
//! A missing optional column is never fatal, it only skips the dependent
//! section.
//!
//! Counts must be non-negative: a negative value is a data error and is
//! rejected at ingestion with the offending line number, never clamped.

use std::collections::BTreeSet;
use std::fmt;
use std::io::Read;

use serde::Deserialize;
use thiserror::Error;

use ordersight_core::FactRow;

/// Known fact-table columns and their header names in the source system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Column {
    Period,
    Client,
    Employee,
    Delivered,
    NotDelivered,
}

impl Column {
    pub fn header_name(&self) -> &'static str {
        match self {
            Column::Period => "id_temps",
            Column::Client => "id_seqClient",
            Column::Employee => "id_seqEmployee",
            Column::Delivered => "nbr_commande_livrees",
            Column::NotDelivered => "nbr_commande_non_livrees",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header_name())
    }
}

/// The entity dimension an analysis groups by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupBy {
    Period,
    Client,
    Employee,
}

impl GroupBy {
    pub fn column(&self) -> Column {
        match self {
            GroupBy::Period => Column::Period,
            GroupBy::Client => Column::Client,
            GroupBy::Employee => Column::Employee,
        }
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("column '{column}' is not present in the dataset")]
    MissingColumn { column: Column },

    #[error("negative count {value} in column '{column}' at line {line}")]
    NegativeCount {
        line: usize,
        column: Column,
        value: i64,
    },

    #[error("CSV parse error at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One fact-table row with whatever entity keys the host supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatasetRow {
    pub period: Option<i64>,
    pub client: Option<i64>,
    pub employee: Option<i64>,
    pub delivered: u64,
    pub not_delivered: u64,
}

/// Raw CSV record before count validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    id_temps: Option<i64>,
    #[serde(default, rename = "id_seqClient")]
    id_seq_client: Option<i64>,
    #[serde(default, rename = "id_seqEmployee")]
    id_seq_employee: Option<i64>,
    nbr_commande_livrees: i64,
    nbr_commande_non_livrees: i64,
}

/// Immutable fact table plus the set of columns actually present.
#[derive(Clone, Debug)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
    columns: BTreeSet<Column>,
}

impl Dataset {
    /// Build a dataset from rows already in memory (the host handoff path).
    ///
    /// An optional column counts as present when at least one row carries a
    /// value for it.
    pub fn from_rows(rows: Vec<DatasetRow>) -> Self {
        let mut columns = BTreeSet::from([Column::Delivered, Column::NotDelivered]);
        if rows.iter().any(|r| r.period.is_some()) {
            columns.insert(Column::Period);
        }
        if rows.iter().any(|r| r.client.is_some()) {
            columns.insert(Column::Client);
        }
        if rows.iter().any(|r| r.employee.is_some()) {
            columns.insert(Column::Employee);
        }
        Self { rows, columns }
    }

    /// Load a dataset from CSV with a header row.
    ///
    /// Headers drive column presence: an optional column absent from the
    /// header is simply absent from the dataset. Both count columns are
    /// required up front.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| DatasetError::Csv {
                line: 1,
                message: e.to_string(),
            })?
            .iter()
            .map(str::to_owned)
            .collect();

        let mut columns = BTreeSet::new();
        for column in [
            Column::Period,
            Column::Client,
            Column::Employee,
            Column::Delivered,
            Column::NotDelivered,
        ] {
            if headers.iter().any(|h| h == column.header_name()) {
                columns.insert(column);
            }
        }
        for required in [Column::Delivered, Column::NotDelivered] {
            if !columns.contains(&required) {
                return Err(DatasetError::MissingColumn { column: required });
            }
        }

        let mut rows = Vec::new();
        for (index, result) in csv_reader.deserialize().enumerate() {
            // Header is line 1; data starts at line 2.
            let line = index + 2;
            let raw: RawRecord = result.map_err(|e| DatasetError::Csv {
                line,
                message: e.to_string(),
            })?;
            rows.push(DatasetRow {
                period: raw.id_temps,
                client: raw.id_seq_client,
                employee: raw.id_seq_employee,
                delivered: validate_count(line, Column::Delivered, raw.nbr_commande_livrees)?,
                not_delivered: validate_count(
                    line,
                    Column::NotDelivered,
                    raw.nbr_commande_non_livrees,
                )?,
            });
        }

        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Project fact rows for one grouping dimension.
    ///
    /// Fails with `MissingColumn` when the dimension's column is absent.
    /// Rows without a key for the dimension (possible on the in-memory
    /// path) carry no observation for it and are skipped.
    pub fn facts(&self, grouping: GroupBy) -> Result<Vec<FactRow>, DatasetError> {
        let column = grouping.column();
        if !self.has_column(column) {
            return Err(DatasetError::MissingColumn { column });
        }

        let facts = self
            .rows
            .iter()
            .filter_map(|row| {
                let key = match grouping {
                    GroupBy::Period => row.period,
                    GroupBy::Client => row.client,
                    GroupBy::Employee => row.employee,
                };
                key.map(|key| FactRow::new(key, row.delivered, row.not_delivered))
            })
            .collect();
        Ok(facts)
    }
}

fn validate_count(line: usize, column: Column, value: i64) -> Result<u64, DatasetError> {
    u64::try_from(value).map_err(|_| DatasetError::NegativeCount {
        line,
        column,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CSV: &str = "\
id_temps,id_seqClient,id_seqEmployee,nbr_commande_livrees,nbr_commande_non_livrees
1,101,5,10,0
1,102,5,5,5
2,101,6,8,2
";

    #[test]
    fn csv_loader_detects_all_columns() {
        let dataset = Dataset::from_csv(FULL_CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        for column in [
            Column::Period,
            Column::Client,
            Column::Employee,
            Column::Delivered,
            Column::NotDelivered,
        ] {
            assert!(dataset.has_column(column), "missing {column}");
        }
    }

    #[test]
    fn absent_optional_column_is_not_fatal() {
        let csv = "\
id_seqClient,nbr_commande_livrees,nbr_commande_non_livrees
101,10,0
";
        let dataset = Dataset::from_csv(csv.as_bytes()).unwrap();
        assert!(!dataset.has_column(Column::Period));
        assert!(matches!(
            dataset.facts(GroupBy::Period),
            Err(DatasetError::MissingColumn {
                column: Column::Period
            })
        ));
        assert_eq!(dataset.facts(GroupBy::Client).unwrap().len(), 1);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "id_seqClient,nbr_commande_livrees\n101,10\n";
        assert!(matches!(
            Dataset::from_csv(csv.as_bytes()),
            Err(DatasetError::MissingColumn {
                column: Column::NotDelivered
            })
        ));
    }

    #[test]
    fn negative_count_is_rejected_with_line_number() {
        let csv = "\
id_seqClient,nbr_commande_livrees,nbr_commande_non_livrees
101,10,0
102,-3,1
";
        match Dataset::from_csv(csv.as_bytes()) {
            Err(DatasetError::NegativeCount {
                line,
                column,
                value,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(column, Column::Delivered);
                assert_eq!(value, -3);
            }
            other => panic!("expected NegativeCount, got {other:?}"),
        }
    }

    #[test]
    fn facts_group_keys_by_requested_dimension() {
        let dataset = Dataset::from_csv(FULL_CSV.as_bytes()).unwrap();
        let by_period = dataset.facts(GroupBy::Period).unwrap();
        assert_eq!(by_period.len(), 3);
        assert_eq!(by_period[0].entity_key, 1);

        let by_employee = dataset.facts(GroupBy::Employee).unwrap();
        assert_eq!(by_employee[2].entity_key, 6);
    }

    #[test]
    fn from_rows_marks_columns_present_when_any_row_has_them() {
        let dataset = Dataset::from_rows(vec![
            DatasetRow {
                period: Some(1),
                client: None,
                employee: None,
                delivered: 4,
                not_delivered: 1,
            },
            DatasetRow {
                period: Some(2),
                client: None,
                employee: None,
                delivered: 2,
                not_delivered: 2,
            },
        ]);
        assert!(dataset.has_column(Column::Period));
        assert!(!dataset.has_column(Column::Client));
    }

    #[test]
    fn empty_csv_yields_empty_dataset() {
        let csv = "id_seqClient,nbr_commande_livrees,nbr_commande_non_livrees\n";
        let dataset = Dataset::from_csv(csv.as_bytes()).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.facts(GroupBy::Client).unwrap().is_empty());
    }
}
