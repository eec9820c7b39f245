use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Transaction, TradeDataset};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a trade dataset from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<TradeDataset> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    load_reader(file).with_context(|| format!("reading {}", path.display()))
}

/// CSV layout: header row with column names, one transaction per record.
///
/// Required columns: `Import_Export`, `Shipping_Method`, `Category`, `Date`,
/// `Value`, `Quantity`, `Weight`. Column order does not matter and extra
/// columns are ignored. Fields are taken verbatim (no whitespace trimming)
/// and a blank numeric cell becomes NaN.
pub fn load_reader<R: Read>(reader: R) -> Result<TradeDataset> {
    let mut reader = csv::Reader::from_reader(reader);

    reader.headers().context("reading CSV headers")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<Transaction>().enumerate() {
        let tx = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        rows.push(tx);
    }

    log::debug!("parsed {} transactions", rows.len());
    Ok(TradeDataset::new(rows))
}
