//! Stateless summaries computed over the filtered view.
//!
//! Every function takes the visible rows as a slice of references and
//! returns owned results; empty input yields empty results. Missing numeric
//! cells (NaN) are skipped, per aggregate or per pair of columns.

use std::collections::BTreeMap;

use super::model::Transaction;
use super::DataError;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Number of rows for one direction value.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionCount {
    pub direction: String,
    pub count: usize,
}

/// Average value per month for one direction. Only months that occur are
/// present, sorted ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    pub direction: String,
    pub points: Vec<(u32, f64)>,
}

/// Box-plot summary of the values in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub category: String,
    pub count: usize,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Total quantity shipped by one method.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingTotal {
    pub method: String,
    pub quantity: f64,
}

/// Numeric columns that enter the correlation matrix, in matrix order.
pub const CORRELATION_COLUMNS: [&str; 3] = ["Quantity", "Value", "Weight"];

/// Pairwise Pearson coefficients; `None` where undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub cells: [[Option<f64>; 3]; 3],
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells[row][col]
    }
}

/// Everything the dashboard draws for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardAggregates {
    pub row_count: usize,
    pub direction_counts: Vec<DirectionCount>,
    pub monthly_mean: Vec<MonthlySeries>,
    pub categories: Vec<BoxStats>,
    pub shipping_quantity: Vec<ShippingTotal>,
    pub correlation: CorrelationMatrix,
}

impl DashboardAggregates {
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

/// Compute all five aggregates. A date that fails to parse aborts the run.
pub fn aggregate(rows: &[&Transaction]) -> Result<DashboardAggregates, DataError> {
    Ok(DashboardAggregates {
        row_count: rows.len(),
        direction_counts: direction_counts(rows),
        monthly_mean: monthly_mean(rows)?,
        categories: category_distribution(rows),
        shipping_quantity: shipping_quantity(rows),
        correlation: correlation(rows),
    })
}

// ---------------------------------------------------------------------------
// Distribution count
// ---------------------------------------------------------------------------

/// Rows per direction, most frequent first (ties keep first appearance).
pub fn direction_counts(rows: &[&Transaction]) -> Vec<DirectionCount> {
    let mut counts: Vec<DirectionCount> = Vec::new();
    for tx in rows {
        match counts.iter_mut().find(|c| c.direction == tx.direction) {
            Some(c) => c.count += 1,
            None => counts.push(DirectionCount {
                direction: tx.direction.clone(),
                count: 1,
            }),
        }
    }
    // stable: equal counts stay in appearance order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

// ---------------------------------------------------------------------------
// Monthly mean
// ---------------------------------------------------------------------------

/// Mean value grouped by (month, direction), one series per direction.
/// Missing values are left out; a month with none left has no point.
pub fn monthly_mean(rows: &[&Transaction]) -> Result<Vec<MonthlySeries>, DataError> {
    // direction → month → (sum, n)
    let mut groups: BTreeMap<&str, BTreeMap<u32, (f64, usize)>> = BTreeMap::new();
    for tx in rows {
        let month = tx.month()?;
        let slot = groups
            .entry(tx.direction.as_str())
            .or_default()
            .entry(month)
            .or_insert((0.0, 0));
        if tx.value.is_finite() {
            slot.0 += tx.value;
            slot.1 += 1;
        }
    }

    Ok(groups
        .into_iter()
        .map(|(direction, months)| MonthlySeries {
            direction: direction.to_string(),
            points: months
                .into_iter()
                .filter(|(_, (_, n))| *n > 0)
                .map(|(m, (sum, n))| (m, sum / n as f64))
                .collect(),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Category distribution
// ---------------------------------------------------------------------------

/// Box-plot statistics of `Value` per category, in order of first appearance.
pub fn category_distribution(rows: &[&Transaction]) -> Vec<BoxStats> {
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();
    for tx in rows {
        match groups.iter_mut().find(|(c, _)| *c == tx.category) {
            Some((_, values)) => values.push(tx.value),
            None => groups.push((tx.category.as_str(), vec![tx.value])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(category, values)| box_stats(category, values))
        .collect()
}

/// Tukey box statistics with 1.5×IQR whiskers. `None` for an empty group.
pub fn box_stats(category: &str, mut values: Vec<f64>) -> Option<BoxStats> {
    values.retain(|v| v.is_finite());
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let q1 = quantile(&values, 0.25);
    let median = quantile(&values, 0.5);
    let q3 = quantile(&values, 0.75);
    let iqr = q3 - q1;
    let lo_fence = q1 - 1.5 * iqr;
    let hi_fence = q3 + 1.5 * iqr;

    let inside = values.iter().copied().filter(|v| (lo_fence..=hi_fence).contains(v));
    let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min).min(q1);
    let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max).max(q3);
    let outliers = values
        .iter()
        .copied()
        .filter(|v| *v < lower_whisker || *v > upper_whisker)
        .collect();

    Some(BoxStats {
        category: category.to_string(),
        count: values.len(),
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    })
}

/// Linear-interpolated quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Shipping sum
// ---------------------------------------------------------------------------

/// Total quantity per shipping method, ordered by method name. Missing
/// quantities count as nothing.
pub fn shipping_quantity(rows: &[&Transaction]) -> Vec<ShippingTotal> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in rows {
        let sum = sums.entry(tx.shipping_method.as_str()).or_insert(0.0);
        if tx.quantity.is_finite() {
            *sum += tx.quantity;
        }
    }
    sums.into_iter()
        .map(|(method, quantity)| ShippingTotal {
            method: method.to_string(),
            quantity,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pearson correlation of Quantity, Value and Weight.
pub fn correlation(rows: &[&Transaction]) -> CorrelationMatrix {
    let columns: [Vec<f64>; 3] = [
        rows.iter().map(|t| t.quantity).collect(),
        rows.iter().map(|t| t.value).collect(),
        rows.iter().map(|t| t.weight).collect(),
    ];

    let mut cells = [[None; 3]; 3];
    for i in 0..3 {
        for j in i..3 {
            let r = if i == j {
                pearson(&columns[i], &columns[j]).map(|_| 1.0)
            } else {
                pearson(&columns[i], &columns[j])
            };
            cells[i][j] = r;
            cells[j][i] = r;
        }
    }
    CorrelationMatrix { cells }
}

/// Pearson over the pairs where both values are present. `None` with fewer
/// than two such pairs, a constant column, or a non-finite result.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| (x, y))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    let n = pairs.len();
    if n < 2 {
        return None;
    }
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::tx;

    fn sample() -> Vec<Transaction> {
        vec![
            tx("Import", "Sea", "Toys", "03-01-2021", 100.0, 10.0, 5.0),
            tx("Export", "Air", "Toys", "15-01-2021", 300.0, 2.0, 1.0),
            tx("Import", "Air", "Books", "20-01-2022", 200.0, 4.0, 9.0),
            tx("Export", "Land", "Books", "07-04-2021", 50.0, 7.0, 3.0),
            tx("Import", "Sea", "Toys", "30-04-2020", 400.0, 1.0, 2.0),
        ]
    }

    fn refs(rows: &[Transaction]) -> Vec<&Transaction> {
        rows.iter().collect()
    }

    #[test]
    fn direction_counts_sum_to_rows() {
        let rows = sample();
        let counts = direction_counts(&refs(&rows));
        assert_eq!(
            counts,
            vec![
                DirectionCount { direction: "Import".into(), count: 3 },
                DirectionCount { direction: "Export".into(), count: 2 },
            ]
        );
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), rows.len());
    }

    #[test]
    fn import_only_view_has_single_slice() {
        let rows = sample();
        let imports: Vec<&Transaction> = rows.iter().filter(|t| t.direction == "Import").collect();
        let counts = direction_counts(&imports);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].direction, "Import");
        assert_eq!(counts[0].count, imports.len());
    }

    #[test]
    fn monthly_mean_groups_by_month_and_direction() {
        let rows = sample();
        let series = monthly_mean(&refs(&rows)).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].direction, "Export");
        assert_eq!(series[0].points, vec![(1, 300.0), (4, 50.0)]);
        assert_eq!(series[1].direction, "Import");
        // January spans two years: (100 + 200) / 2
        assert_eq!(series[1].points, vec![(1, 150.0), (4, 400.0)]);
    }

    #[test]
    fn monthly_mean_rejects_bad_dates() {
        let rows = vec![tx("Import", "Sea", "Toys", "2021/01/03", 1.0, 1.0, 1.0)];
        assert!(matches!(
            monthly_mean(&refs(&rows)),
            Err(DataError::InvalidDate { .. })
        ));
        assert!(aggregate(&refs(&rows)).is_err());
    }

    #[test]
    fn box_stats_quartiles_and_outliers() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 100.0];
        let stats = box_stats("Toys", values).unwrap();

        assert_eq!(stats.count, 9);
        assert_eq!(stats.q1, 3.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.q3, 7.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 8.0);
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn box_stats_interpolates_even_counts() {
        let stats = box_stats("x", vec![4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let rows = sample();
        let cats = category_distribution(&refs(&rows));
        let names: Vec<&str> = cats.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Toys", "Books"]);
        assert_eq!(cats[0].count, 3);
        assert_eq!(cats[0].median, 300.0);
    }

    #[test]
    fn shipping_sum_matches_total_quantity() {
        let rows = sample();
        let totals = shipping_quantity(&refs(&rows));
        let methods: Vec<&str> = totals.iter().map(|t| t.method.as_str()).collect();
        assert_eq!(methods, vec!["Air", "Land", "Sea"]);
        assert_eq!(totals[2].quantity, 11.0);

        let total: f64 = totals.iter().map(|t| t.quantity).sum();
        let expected: f64 = rows.iter().map(|t| t.quantity).sum();
        assert_eq!(total, expected);
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal() {
        let rows = sample();
        let corr = correlation(&refs(&rows));
        for i in 0..3 {
            assert_eq!(corr.get(i, i), Some(1.0));
            for j in 0..3 {
                assert_eq!(corr.get(i, j), corr.get(j, i));
                let r = corr.get(i, j).unwrap();
                assert!((-1.0..=1.0).contains(&r));
            }
        }
    }

    #[test]
    fn linear_columns_correlate_perfectly() {
        let rows: Vec<Transaction> = (1..=6)
            .map(|i| {
                let q = i as f64;
                tx("Import", "Sea", "Toys", "01-01-2021", 3.0 * q + 1.0, q, 10.0 - 2.0 * q)
            })
            .collect();
        let corr = correlation(&refs(&rows));
        assert!((corr.get(0, 1).unwrap() - 1.0).abs() < 1e-12);
        assert!((corr.get(0, 2).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_is_undefined() {
        let rows = vec![
            tx("Import", "Sea", "Toys", "01-01-2021", 1.0, 5.0, 2.0),
            tx("Import", "Sea", "Toys", "01-01-2021", 2.0, 5.0, 3.0),
        ];
        let corr = correlation(&refs(&rows));
        assert_eq!(corr.get(0, 0), None);
        assert_eq!(corr.get(0, 1), None);
        assert!((corr.get(1, 2).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_values_are_skipped_by_mean_and_sum() {
        let rows = vec![
            tx("Import", "Air", "Toys", "03-01-2021", f64::NAN, 1.0, 2.0),
            tx("Import", "Air", "Toys", "09-01-2021", 10.0, f64::NAN, 3.0),
            tx("Export", "Sea", "Toys", "11-02-2021", f64::NAN, 4.0, 1.0),
        ];
        let refs = refs(&rows);

        let series = monthly_mean(&refs).unwrap();
        assert_eq!(series[0].direction, "Export");
        assert!(series[0].points.is_empty());
        assert_eq!(series[1].points, vec![(1, 10.0)]);

        let totals = shipping_quantity(&refs);
        assert_eq!(totals[0].quantity, 1.0);
        assert_eq!(totals[1].quantity, 4.0);

        let cats = category_distribution(&refs);
        assert_eq!(cats[0].count, 1);
        assert_eq!(cats[0].median, 10.0);
    }

    #[test]
    fn correlation_uses_pairwise_complete_rows() {
        let rows = vec![
            tx("Import", "Air", "Toys", "01-01-2021", 2.0, 1.0, 5.0),
            tx("Import", "Air", "Toys", "01-01-2021", 4.0, 2.0, f64::NAN),
            tx("Import", "Air", "Toys", "01-01-2021", 6.0, 3.0, 1.0),
            tx("Import", "Air", "Toys", "01-01-2021", f64::NAN, 4.0, 0.0),
        ];
        let corr = correlation(&refs(&rows));

        // quantity/value: rows 0-2 only, perfectly linear
        assert!((corr.get(0, 1).unwrap() - 1.0).abs() < 1e-12);
        // quantity/weight: rows 0, 2, 3
        let r = corr.get(0, 2).unwrap();
        assert!(r.is_finite() && r < 0.0);
        // value/weight: rows 0 and 2 only, still two pairs
        assert!((corr.get(1, 2).unwrap() + 1.0).abs() < 1e-12);
        for i in 0..3 {
            assert_eq!(corr.get(i, i), Some(1.0));
        }
    }

    #[test]
    fn correlation_without_complete_pairs_is_undefined() {
        let rows = vec![
            tx("Import", "Air", "Toys", "01-01-2021", f64::NAN, 1.0, 5.0),
            tx("Import", "Air", "Toys", "01-01-2021", 3.0, 2.0, f64::NAN),
            tx("Import", "Air", "Toys", "01-01-2021", f64::INFINITY, 3.0, 7.0),
        ];
        let corr = correlation(&refs(&rows));
        assert_eq!(corr.get(1, 1), None);
        assert_eq!(corr.get(0, 1), None);
        assert_eq!(corr.get(1, 2), None);
        assert!(corr.cells.iter().flatten().flatten().all(|r| r.is_finite()));
    }

    #[test]
    fn empty_view_aggregates_to_empty() {
        let agg = aggregate(&[]).unwrap();
        assert!(agg.is_empty());
        assert!(agg.direction_counts.is_empty());
        assert!(agg.monthly_mean.is_empty());
        assert!(agg.categories.is_empty());
        assert!(agg.shipping_quantity.is_empty());
        assert_eq!(agg.correlation.cells, [[None; 3]; 3]);
    }
}
