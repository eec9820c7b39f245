use std::path::Path;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::aggregate::{aggregate, DashboardAggregates};
use crate::data::filter::{
    direction_indices, filtered_indices, shipping_method_options, FilterState, Selection,
};
use crate::data::loader::load_file;
use crate::data::model::TradeSample;
use crate::data::sample::sample_rows;

/// Load `path` and draw the configured sample from it.
pub fn load_sample(path: &Path, config: &DashboardConfig) -> Result<TradeSample> {
    let dataset = load_file(path)?;
    log::info!("Loaded {} transactions from {}", dataset.len(), path.display());
    if dataset.is_empty() {
        log::warn!("{} has a header but no rows", path.display());
    }

    let sample = sample_rows(&dataset, config.sample_size, config.seed)
        .with_context(|| format!("sampling {}", path.display()))?;
    log::info!(
        "Sampled {} of {} rows (seed {})",
        sample.len(),
        sample.population,
        sample.seed
    );
    Ok(sample)
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Sampled rows (None until a file has been loaded).
    pub sample: Option<TradeSample>,

    /// Sidebar selections.
    pub filters: FilterState,

    /// Entries of the shipping-method dropdown ("All" first).
    pub shipping_options: Vec<String>,

    /// Indices into the sample passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates of the visible rows, recomputed on every filter change.
    pub aggregates: Option<DashboardAggregates>,

    /// Why the aggregates could not be computed.
    pub aggregate_error: Option<String>,

    /// Shared direction colours for the pie and line charts.
    pub direction_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            sample: None,
            filters: FilterState::default(),
            shipping_options: Vec::new(),
            visible_indices: Vec::new(),
            aggregates: None,
            aggregate_error: None,
            direction_colors: ColorMap::new(std::iter::empty::<&str>()),
            status_message: None,
        }
    }

    /// Ingest a newly drawn sample, reset filters and recompute.
    pub fn set_sample(&mut self, sample: TradeSample) {
        self.direction_colors = ColorMap::new(sample.rows.iter().map(|t| t.direction.as_str()));
        self.filters = FilterState::default();
        self.sample = Some(sample);
        self.status_message = None;
        self.refilter();
    }

    /// Load another file with the configured sample size and seed. On failure
    /// the current sample stays and the error goes to the status bar.
    pub fn open(&mut self, path: &Path) {
        match load_sample(path, &self.config) {
            Ok(sample) => {
                self.config.input = path.to_path_buf();
                self.set_sample(sample);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn set_direction(&mut self, selection: Selection) {
        if self.filters.direction != selection {
            self.filters.direction = selection;
            self.refilter();
        }
    }

    pub fn set_shipping_method(&mut self, selection: Selection) {
        if self.filters.shipping_method != selection {
            self.filters.shipping_method = selection;
            self.refilter();
        }
    }

    /// Recompute options, visible indices and aggregates after a change.
    pub fn refilter(&mut self) {
        let Some(sample) = &self.sample else {
            return;
        };
        let rows = &sample.rows;

        let by_direction = direction_indices(rows, &self.filters);
        self.shipping_options = shipping_method_options(rows, &by_direction);

        // a method that vanished from the dropdown falls back to "All"
        if let Selection::Only(method) = &self.filters.shipping_method {
            if !self.shipping_options.contains(method) {
                self.filters.shipping_method = Selection::All;
            }
        }

        self.visible_indices = filtered_indices(rows, &self.filters);
        log::debug!(
            "filters {:?} → {} of {} rows",
            self.filters,
            self.visible_indices.len(),
            rows.len()
        );

        let view = sample.view(&self.visible_indices);
        match aggregate(&view) {
            Ok(agg) => {
                self.aggregates = Some(agg);
                self.aggregate_error = None;
            }
            Err(e) => {
                log::error!("Failed to aggregate: {e}");
                self.aggregates = None;
                self.aggregate_error = Some(e.to_string());
            }
        }
    }
}
