use indexmap::IndexMap;
use tracing::debug;

use crate::api::chart_config::ChartConfig;
use crate::api::frame_builder;
use crate::core::{DataPointCollection, EventPoint};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// One chart: immutable configuration plus the data being plotted.
///
/// A chart owns its collections, keyed by series name in insertion order.
/// The caller mutates data between render passes; one instance renders one
/// image synchronously and holds no shared state.
#[derive(Debug, Clone)]
pub struct Chart {
    config: ChartConfig,
    collections: IndexMap<String, DataPointCollection>,
    events: Vec<EventPoint>,
}

impl Chart {
    /// Validates the configuration once and builds an empty chart.
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            collections: IndexMap::new(),
            events: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Inserts or replaces the series with the collection's name.
    pub fn set_collection(&mut self, collection: DataPointCollection) {
        debug!(
            series = %collection.name,
            points = collection.len(),
            "set data collection"
        );
        self.collections.insert(collection.name.clone(), collection);
    }

    pub fn remove_collection(&mut self, name: &str) -> Option<DataPointCollection> {
        self.collections.shift_remove(name)
    }

    pub fn collections(&self) -> impl Iterator<Item = &DataPointCollection> {
        self.collections.values()
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.collections.len()
    }

    /// Replaces the event annotations overlaid on line-plotting kinds.
    pub fn set_events(&mut self, events: Vec<EventPoint>) {
        self.events = events;
    }

    #[must_use]
    pub fn events(&self) -> &[EventPoint] {
        &self.events
    }

    /// Drops all data and events, keeping the configuration.
    pub fn clear(&mut self) {
        self.collections.clear();
        self.events.clear();
    }

    /// Runs one full layout pass over the current data.
    ///
    /// An empty or all-NaN dataset produces a frame holding only the
    /// placeholder message, never an error.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let collections: Vec<&DataPointCollection> = self.collections.values().collect();
        frame_builder::build_frame(&self.config, &collections, &self.events)
    }

    /// Builds a frame and hands it to the backend.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        renderer.render(&frame)
    }

    /// Renders to an offscreen cairo surface and writes a PNG bitmap.
    #[cfg(feature = "cairo-backend")]
    pub fn render_png(&self, path: impl AsRef<std::path::Path>) -> ChartResult<()> {
        use crate::render::CairoRenderer;

        let frame = self.build_render_frame()?;
        let mut renderer = CairoRenderer::new(
            self.config.viewport.width as i32,
            self.config.viewport.height as i32,
        )?;
        renderer.set_clear_color(self.config.style.background)?;
        renderer.render(&frame)?;
        renderer.write_png(path)
    }
}
