use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::Result;
use eframe::egui;

use crate::color::ColorMap;
use crate::config::Config;
use crate::data::Dataset;
use crate::data::loader;
use crate::geometry::Canvas;
use crate::scene::{Layout, RenderOptions, Scene};

// ---------------------------------------------------------------------------
// Load pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureOrder {
    /// Keep file order.
    None,
    #[default]
    Variance,
    Correlation,
}

impl FeatureOrder {
    pub const ALL: [FeatureOrder; 3] = [FeatureOrder::None, FeatureOrder::Variance, FeatureOrder::Correlation];

    pub fn label(&self) -> &'static str {
        match self {
            FeatureOrder::None => "None",
            FeatureOrder::Variance => "Variance",
            FeatureOrder::Correlation => "Correlation",
        }
    }

    pub fn apply(&self, dataset: &mut Dataset) {
        match self {
            FeatureOrder::None => {}
            FeatureOrder::Variance => {
                dataset.sort_features_by_variance();
            }
            FeatureOrder::Correlation => {
                dataset.sort_features_by_correlation();
            }
        }
    }
}

/// Everything needed to (re)build the displayed dataset from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub source: PathBuf,
    pub has_label: bool,
    pub scale: bool,
    pub order: FeatureOrder,
    pub layout: Layout,
    /// Minkowski exponent of the perspective distance column.
    pub p: f64,
}

impl LoadRequest {
    /// Load → scale → reorder → append distance to the origin.
    ///
    /// The devise layout always measures Euclidean distance; perspective
    /// uses `p`.
    pub fn run(&self) -> Result<Dataset> {
        let mut dataset = loader::load_file(&self.source, self.has_label)?;
        if self.scale {
            dataset.scale();
        }
        self.order.apply(&mut dataset);

        if self.layout.needs_distance() {
            let zero = vec![0.0; dataset.feature_count()];
            match self.layout {
                Layout::Perspective => dataset.add_distance_to(self.p, &zero)?,
                _ => dataset.append_distance(&zero)?,
            };
        }
        Ok(dataset)
    }
}

type LoadResponse = (u64, Result<Dataset>);

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,
    pub colors: ColorMap,

    /// Currently displayed dataset (empty while loading).
    pub dataset: Dataset,

    /// Selected catalog entry.
    pub file: String,
    /// File actually loaded; differs from the catalog after File → Open….
    pub source: PathBuf,
    pub has_label: bool,
    pub scale: bool,
    pub order: FeatureOrder,
    pub layout: Layout,
    pub p: f64,
    pub options: RenderOptions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a load is in flight.
    pub loading: bool,

    /// Token of the latest load request; older responses are dropped.
    token: u64,
    sender: Sender<LoadResponse>,
    receiver: Receiver<LoadResponse>,
    repaint: Option<egui::Context>,
    scene: Option<Scene>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let (sender, receiver) = mpsc::channel();
        let file = config.files.first().cloned().unwrap_or_default();
        let source = config.dataset_path(&file);

        Self {
            colors: ColorMap::new(&config.colors),
            dataset: Dataset::empty(),
            file,
            source,
            has_label: true,
            scale: true,
            order: FeatureOrder::default(),
            layout: config.layout,
            p: config.p,
            options: RenderOptions {
                step: config.step,
                radius: config.radius,
                show_path: false,
                color_label: true,
                color_features: true,
            },
            status_message: None,
            loading: false,
            token: 0,
            sender,
            receiver,
            repaint: None,
            scene: None,
            config,
        }
    }

    /// Ask the loader thread to wake the UI when a response arrives.
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.config.width, self.config.height)
    }

    pub fn request(&self) -> LoadRequest {
        LoadRequest {
            source: self.source.clone(),
            has_label: self.has_label,
            scale: self.scale,
            order: self.order,
            layout: self.layout,
            p: self.p,
        }
    }

    // -- Loading --

    /// Start loading the current source in the background.
    ///
    /// The displayed dataset is cleared immediately; the response of any
    /// earlier request still in flight will be discarded.
    pub fn reload(&mut self) {
        self.token += 1;
        let token = self.token;
        let request = self.request();
        let sender = self.sender.clone();
        let repaint = self.repaint.clone();

        self.dataset = Dataset::empty();
        self.scene = None;
        self.loading = true;
        self.status_message = None;
        log::debug!("load #{token}: {}", request.source.display());

        std::thread::spawn(move || {
            let result = request.run();
            // receiver gone means the app is shutting down
            let _ = sender.send((token, result));
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Select a catalog entry and reload.
    pub fn select_file(&mut self, file: String) {
        self.source = self.config.dataset_path(&file);
        self.file = file;
        self.reload();
    }

    /// Load a file outside the catalog.
    pub fn open_path(&mut self, path: PathBuf) {
        self.source = path;
        self.reload();
    }

    /// Drain finished loads, keeping only the latest request's result.
    pub fn poll(&mut self) {
        while let Ok((token, result)) = self.receiver.try_recv() {
            self.apply_response(token, result);
        }
    }

    fn apply_response(&mut self, token: u64, result: Result<Dataset>) {
        if token != self.token {
            log::warn!("discarding stale load #{token} (latest is #{})", self.token);
            return;
        }

        self.loading = false;
        self.scene = None;
        match result {
            Ok(dataset) => {
                log::info!(
                    "Showing {} rows x {} columns from {}",
                    dataset.len(),
                    dataset.columns().len(),
                    self.source.display()
                );
                self.dataset = dataset;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", self.source.display());
                self.dataset = Dataset::empty();
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    // -- In-place changes --

    /// Scaling on is applied to the held dataset; scaling off needs the raw
    /// values again, so it reloads. Distance layouts always reload so the
    /// distance is measured on scaled features.
    pub fn set_scale(&mut self, scale: bool) {
        self.scale = scale;
        if scale && !self.loading && !self.layout.needs_distance() {
            self.dataset.scale();
            self.scene = None;
        } else {
            self.reload();
        }
    }

    /// Reorder the held dataset's features.
    pub fn set_order(&mut self, order: FeatureOrder) {
        self.order = order;
        if order == FeatureOrder::None || self.loading {
            self.reload();
        } else {
            order.apply(&mut self.dataset);
            self.scene = None;
        }
    }

    /// Layouts with a distance column need a fresh pipeline run.
    pub fn set_layout(&mut self, layout: Layout) {
        if layout == self.layout {
            return;
        }
        let reload = layout.needs_distance() || self.layout.needs_distance();
        self.layout = layout;
        if reload {
            self.reload();
        } else {
            self.scene = None;
        }
    }

    pub fn set_p(&mut self, p: f64) {
        if p > 0.0 && p != self.p {
            self.p = p;
            if self.layout == Layout::Perspective {
                self.reload();
            }
        }
    }

    /// Changed render options only rebuild the scene.
    pub fn set_options(&mut self, options: RenderOptions) {
        if options != self.options {
            self.options = options;
            self.scene = None;
        }
    }

    /// Scene for the current dataset, rebuilt after any change.
    pub fn scene(&mut self) -> &Scene {
        let canvas = self.canvas();
        self.scene.get_or_insert_with(|| {
            Scene::build(&self.dataset, self.layout, canvas, &self.options, &self.colors)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::*;

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, "{body}").unwrap();
        path
    }

    fn state_for(dir: &tempfile::TempDir) -> AppState {
        AppState::new(Config {
            data_dir: dir.path().to_path_buf(),
            files: vec!["a.csv".into(), "b.csv".into()],
            ..Config::default()
        })
    }

    fn wait(state: &mut AppState) {
        let (token, result) = state.receiver.recv_timeout(Duration::from_secs(10)).unwrap();
        state.apply_response(token, result);
    }

    #[test]
    fn request_pipeline_scales_sorts_and_appends_distance() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_csv(&dir, "a.csv", "0,10,0\n10,0,1\n5,5,1\n");

        let request = LoadRequest {
            source,
            has_label: true,
            scale: true,
            order: FeatureOrder::Correlation,
            layout: Layout::Devise,
            p: 3.0,
        };
        let ds = request.run().unwrap();
        assert_eq!(ds.columns().len(), 3);
        assert_eq!(ds.feature_count(), 2);
        assert!(ds.rows().iter().all(|r| r.len() == 3));
        assert!(ds.has_labels());
    }

    #[test]
    fn perspective_uses_configured_exponent() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_csv(&dir, "a.csv", "3,4\n0,0\n");
        let request = LoadRequest {
            source,
            has_label: false,
            scale: false,
            order: FeatureOrder::None,
            layout: Layout::Perspective,
            p: 1.0,
        };
        let ds = request.run().unwrap();
        assert_eq!(ds.rows()[0][2], 7.0);
    }

    #[test]
    fn spiral_request_has_no_distance_column() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_csv(&dir, "a.csv", "3,4\n0,0\n");
        let request = LoadRequest {
            source,
            has_label: false,
            scale: false,
            order: FeatureOrder::Variance,
            layout: Layout::Spiral,
            p: 2.0,
        };
        assert_eq!(request.run().unwrap().columns().len(), 2);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_for(&dir);
        state.token = 2;

        let old = Dataset::from_records(vec![vec![1.0, 2.0]], false);
        state.apply_response(1, Ok(old));
        assert!(state.dataset.is_empty());

        let new = Dataset::from_records(vec![vec![1.0, 2.0], vec![3.0, 4.0]], false);
        state.loading = true;
        state.apply_response(2, Ok(new));
        assert_eq!(state.dataset.len(), 2);
        assert!(!state.loading);
    }

    #[test]
    fn superseded_load_never_overwrites_newer_one() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(&dir, "a.csv", "1,2,0\n");
        write_csv(&dir, "b.csv", "1,2,0\n3,4,1\n5,6,2\n");
        let mut state = state_for(&dir);

        state.select_file("a.csv".into());
        state.select_file("b.csv".into());
        wait(&mut state);
        wait(&mut state);

        assert_eq!(state.dataset.len(), 3);
        assert_eq!(state.file, "b.csv");
        assert!(!state.loading);
    }

    #[test]
    fn failed_load_reports_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_for(&dir);
        state.open_path(dir.path().join("missing.csv"));
        wait(&mut state);

        assert!(state.dataset.is_empty());
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error"));
    }

    #[test]
    fn reload_clears_displayed_dataset() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(&dir, "a.csv", "1,2,0\n3,4,1\n");
        let mut state = state_for(&dir);
        state.reload();
        wait(&mut state);
        assert!(!state.dataset.is_empty());

        state.reload();
        assert!(state.dataset.is_empty());
        assert!(state.loading);
        wait(&mut state);
        assert_eq!(state.dataset.len(), 2);
    }

    #[test]
    fn option_changes_rebuild_scene() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_for(&dir);
        state.dataset = Dataset::from_records(vec![vec![0.0, 1.0, 0.0], vec![1.0, 0.0, 1.0]], true);

        assert!(state.scene().trails().all(|(_, _, visible)| !visible));
        let options = RenderOptions {
            show_path: true,
            ..state.options
        };
        state.set_options(options);
        assert!(state.scene().trails().all(|(_, _, visible)| visible));
    }

    #[test]
    fn order_change_applies_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_for(&dir);
        state.dataset = Dataset::from_records(vec![vec![0.0, 1.0], vec![10.0, 2.0], vec![20.0, 3.0]], false);
        state.set_order(FeatureOrder::Variance);
        assert_eq!(state.dataset.rows()[1], vec![2.0, 10.0]);
    }
}
