use std::collections::BTreeSet;
use std::fmt;

use super::model::Transaction;

/// Label of the "no filter" entry in every dropdown.
pub const ALL_LABEL: &str = "All";

/// Fixed choices of the transaction-type dropdown.
pub const DIRECTION_OPTIONS: [&str; 3] = [ALL_LABEL, "Import", "Export"];

// ---------------------------------------------------------------------------
// Filter predicate: one exact-match selection per column
// ---------------------------------------------------------------------------

/// A dropdown choice: either everything or rows equal to one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Build from a dropdown label, mapping [`ALL_LABEL`] to [`Selection::All`].
    pub fn from_label(label: &str) -> Self {
        if label == ALL_LABEL {
            Selection::All
        } else {
            Selection::Only(label.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => v == value,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "{ALL_LABEL}"),
            Selection::Only(v) => write!(f, "{v}"),
        }
    }
}

/// Which column a [`Selection`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Direction,
    ShippingMethod,
}

impl FilterColumn {
    pub fn value_of(self, tx: &Transaction) -> &str {
        match self {
            FilterColumn::Direction => &tx.direction,
            FilterColumn::ShippingMethod => &tx.shipping_method,
        }
    }
}

/// Current sidebar selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub direction: Selection,
    pub shipping_method: Selection,
}

/// Narrow `indices` to the rows whose `column` matches `selection`.
///
/// Returns a new index list in the same order; `Selection::All` returns the
/// input unchanged.
pub fn apply_selection(
    rows: &[Transaction],
    indices: &[usize],
    column: FilterColumn,
    selection: &Selection,
) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| {
            rows.get(i)
                .is_some_and(|tx| selection.matches(column.value_of(tx)))
        })
        .collect()
}

/// Indices of the rows that pass the direction filter alone.
pub fn direction_indices(rows: &[Transaction], filters: &FilterState) -> Vec<usize> {
    let all: Vec<usize> = (0..rows.len()).collect();
    apply_selection(rows, &all, FilterColumn::Direction, &filters.direction)
}

/// Return indices of rows that pass all active filters, in row order.
///
/// Filters are applied direction first, then shipping method; an empty
/// result is valid.
pub fn filtered_indices(rows: &[Transaction], filters: &FilterState) -> Vec<usize> {
    let by_direction = direction_indices(rows, filters);
    apply_selection(
        rows,
        &by_direction,
        FilterColumn::ShippingMethod,
        &filters.shipping_method,
    )
}

/// Shipping-method dropdown entries: "All" followed by the distinct methods
/// found in `indices`, in order of first appearance.
pub fn shipping_method_options(rows: &[Transaction], indices: &[usize]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut options = vec![ALL_LABEL.to_string()];
    for tx in indices.iter().filter_map(|&i| rows.get(i)) {
        if seen.insert(tx.shipping_method.as_str()) {
            options.push(tx.shipping_method.clone());
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::tx;

    fn rows() -> Vec<Transaction> {
        vec![
            tx("Import", "Sea", "A", "01-01-2021", 1.0, 1.0, 1.0),
            tx("Export", "Air", "A", "01-01-2021", 2.0, 1.0, 1.0),
            tx("Import", "Air", "B", "01-01-2021", 3.0, 1.0, 1.0),
            tx("Export", "Land", "B", "01-01-2021", 4.0, 1.0, 1.0),
            tx("Import", "Sea", "C", "01-01-2021", 5.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn no_filters_keeps_everything() {
        let rows = rows();
        assert_eq!(
            filtered_indices(&rows, &FilterState::default()),
            vec![0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn direction_filter_matches_exactly() {
        let rows = rows();
        let filters = FilterState {
            direction: Selection::from_label("Import"),
            ..Default::default()
        };
        let idx = filtered_indices(&rows, &filters);
        assert_eq!(idx, vec![0, 2, 4]);
        assert!(idx.iter().all(|&i| rows[i].direction == "Import"));
    }

    #[test]
    fn filters_combine_with_and() {
        let rows = rows();
        let filters = FilterState {
            direction: Selection::Only("Import".into()),
            shipping_method: Selection::Only("Sea".into()),
        };
        assert_eq!(filtered_indices(&rows, &filters), vec![0, 4]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let rows = rows();
        let filters = FilterState {
            direction: Selection::Only("Export".into()),
            shipping_method: Selection::Only("Sea".into()),
        };
        assert!(filtered_indices(&rows, &filters).is_empty());
    }

    #[test]
    fn shipping_options_follow_direction_view() {
        let rows = rows();
        let all = FilterState::default();
        assert_eq!(
            shipping_method_options(&rows, &direction_indices(&rows, &all)),
            vec!["All", "Sea", "Air", "Land"]
        );

        let exports = FilterState {
            direction: Selection::Only("Export".into()),
            ..Default::default()
        };
        assert_eq!(
            shipping_method_options(&rows, &direction_indices(&rows, &exports)),
            vec!["All", "Air", "Land"]
        );
    }

    #[test]
    fn all_label_round_trips() {
        assert_eq!(Selection::from_label(ALL_LABEL), Selection::All);
        assert_eq!(Selection::All.to_string(), "All");
        assert_eq!(Selection::Only("Air".into()).to_string(), "Air");
    }
}
