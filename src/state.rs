use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;

use maritime_board::config::AppConfig;
use maritime_board::data::export::export_csv;
use maritime_board::data::filter::{Facet, FilterCriteria};
use maritime_board::data::loader::load_file;
use maritime_board::data::model::Dataset;
use maritime_board::data::snapshot::SnapshotStore;
use maritime_board::engine::{run_query, QueryOutcome};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Where loaded datasets are published.
    pub store: Arc<SnapshotStore>,

    /// Snapshot the current outcome was computed on (None until a file loads).
    pub dataset: Option<Arc<Dataset>>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// KPIs, charts and filter options for `criteria` (cached).
    pub outcome: QueryOutcome,

    /// Colour per category code, fixed for the lifetime of a snapshot.
    pub category_colors: ColorMap,

    /// Zero-based page of the shipments table.
    pub table_page: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,

    pending: Option<Receiver<anyhow::Result<Dataset>>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            store: Arc::new(SnapshotStore::new()),
            dataset: None,
            criteria: FilterCriteria::default(),
            outcome: QueryOutcome::default(),
            category_colors: ColorMap::new(&[]),
            table_page: 0,
            status_message: None,
            loading: false,
            pending: None,
        }
    }

    /// Load `path` on a worker thread; [`poll_loader`](Self::poll_loader)
    /// picks up the result.
    pub fn start_loading(&mut self, path: PathBuf) {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver may be gone if another load superseded this one.
            let _ = tx.send(load_file(&path));
        });
        self.pending = Some(rx);
        self.loading = true;
        self.status_message = None;
    }

    /// Apply a finished background load, if any.
    pub fn poll_loader(&mut self) {
        let result = match &self.pending {
            Some(rx) => rx.try_recv(),
            None => return,
        };
        match result {
            Ok(Ok(dataset)) => {
                self.pending = None;
                self.set_dataset(dataset);
            }
            Ok(Err(e)) => {
                self.pending = None;
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                self.loading = false;
            }
        }
    }

    /// Publish a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let snapshot = self.store.publish(dataset);
        self.criteria.clear_all();
        self.dataset = Some(snapshot);
        self.refilter();
        self.category_colors = ColorMap::new(&self.outcome.options.categories);
        self.status_message = None;
        self.loading = false;
    }

    /// Recompute the outcome after a filter change.
    pub fn refilter(&mut self) {
        self.outcome = match &self.dataset {
            Some(ds) => run_query(ds, &self.criteria, &self.config.engine),
            None => QueryOutcome::default(),
        };
        self.table_page = 0;
    }

    pub fn set_facet(&mut self, facet: Facet, value: String) {
        self.criteria.set(facet, Some(value));
        self.refilter();
    }

    pub fn clear_facet(&mut self, facet: Facet) {
        self.criteria.clear(facet);
        self.refilter();
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.criteria.start_date = date;
        self.refilter();
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.criteria.end_date = date;
        self.refilter();
    }

    pub fn clear_dates(&mut self) {
        self.criteria.clear_dates();
        self.refilter();
    }

    pub fn clear_all(&mut self) {
        self.criteria.clear_all();
        self.refilter();
    }

    /// Number of records currently matching.
    pub fn matching(&self) -> usize {
        self.outcome.indices.len()
    }

    /// Write the matching records to `path`.
    pub fn export_filtered(&mut self, path: &Path) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let records = self.outcome.records(ds);
        self.status_message = match export_csv(path, &records) {
            Ok(n) => Some(format!("Exported {n} rows to {}", path.display())),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                Some(format!("Error: {e:#}"))
            }
        };
    }
}
