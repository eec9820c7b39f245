use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};

use super::DataError;

/// Format of the `Date` column, e.g. `27-03-2021`.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

// ---------------------------------------------------------------------------
// Transaction – one row of the CSV file
// ---------------------------------------------------------------------------

/// A single import/export transaction.
///
/// Only the columns the dashboard uses are deserialized; any other columns in
/// the file (`Transaction_ID`, `Country`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    /// `Import` or `Export`.
    #[serde(rename = "Import_Export")]
    pub direction: String,
    #[serde(rename = "Shipping_Method")]
    pub shipping_method: String,
    #[serde(rename = "Category")]
    pub category: String,
    /// Kept as text; parsed on demand by [`Transaction::month`].
    #[serde(rename = "Date")]
    pub date: String,
    /// Numeric cells left blank in the file read as NaN.
    #[serde(rename = "Value", deserialize_with = "missing_as_nan")]
    pub value: f64,
    #[serde(rename = "Quantity", deserialize_with = "missing_as_nan")]
    pub quantity: f64,
    #[serde(rename = "Weight", deserialize_with = "missing_as_nan")]
    pub weight: f64,
}

fn missing_as_nan<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    let cell: Option<f64> = Option::deserialize(de)?;
    Ok(cell.unwrap_or(f64::NAN))
}

impl Transaction {
    /// Parse the date column.
    pub fn parsed_date(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
    }

    /// Calendar month (1-12) of the transaction date.
    pub fn month(&self) -> Result<u32, DataError> {
        self.parsed_date()
            .map(|d| d.month())
            .map_err(|_| DataError::InvalidDate {
                value: self.date.clone(),
            })
    }
}

// ---------------------------------------------------------------------------
// TradeDataset – the complete loaded file
// ---------------------------------------------------------------------------

/// All transactions read from one file, in file order.
#[derive(Debug, Clone, Default)]
pub struct TradeDataset {
    pub rows: Vec<Transaction>,
}

impl TradeDataset {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TradeSample – the seeded subset the dashboard works on
// ---------------------------------------------------------------------------

/// A fixed-size random subset of a [`TradeDataset`], in draw order.
#[derive(Debug, Clone)]
pub struct TradeSample {
    pub rows: Vec<Transaction>,
    /// Seed used to draw the sample.
    pub seed: u64,
    /// Row count of the dataset the sample was drawn from.
    pub population: usize,
}

impl TradeSample {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow the rows at `indices`, preserving their order.
    pub fn view(&self, indices: &[usize]) -> Vec<&Transaction> {
        indices.iter().filter_map(|&i| self.rows.get(i)).collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::tx;
    use super::*;

    #[test]
    fn month_is_parsed_from_day_month_year() {
        let t = tx("Import", "Air", "Toys", "27-03-2021", 1.0, 1.0, 1.0);
        assert_eq!(t.month().unwrap(), 3);

        let t = tx("Import", "Air", "Toys", "5-11-2020", 1.0, 1.0, 1.0);
        assert_eq!(t.month().unwrap(), 11);
    }

    #[test]
    fn iso_dates_are_rejected() {
        let t = tx("Export", "Sea", "Toys", "2021-03-27", 1.0, 1.0, 1.0);
        match t.month() {
            Err(DataError::InvalidDate { value }) => assert_eq!(value, "2021-03-27"),
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn view_keeps_index_order() {
        let sample = TradeSample {
            rows: vec![
                tx("Import", "Air", "A", "01-01-2020", 1.0, 1.0, 1.0),
                tx("Export", "Sea", "B", "01-01-2020", 2.0, 1.0, 1.0),
                tx("Import", "Land", "C", "01-01-2020", 3.0, 1.0, 1.0),
            ],
            seed: 0,
            population: 3,
        };
        let view = sample.view(&[2, 0]);
        let values: Vec<f64> = view.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![3.0, 1.0]);
    }
}
