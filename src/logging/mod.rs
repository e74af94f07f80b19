use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{filter::LevelFilter, prelude::*, reload, Registry};

/// Keeps the non blocking writer alive and allows changing the level after start up.
/// Dropping it flushes pending records.
pub struct Logging {
    _guard: WorkerGuard,
    reload_handle: reload::Handle<LevelFilter, Registry>,
}

impl Logging {
    /// Installs a bunyan JSON subscriber writing to stderr, stdout is left for the event
    /// itself. Starts at WARN.
    pub fn init() -> anyhow::Result<Self> {
        LogTracer::init()?;

        let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stderr());
        let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name, non_blocking_writer);

        // Instantiate a tracing subscriber with reloadable level filter
        let (filter, reload_handle) = reload::Layer::new(LevelFilter::WARN);
        tracing_subscriber::registry()
            .with(filter)
            .with(JsonStorageLayer)
            .with(bunyan_formatting_layer)
            .try_init()?;

        Ok(Self {
            _guard: guard,
            reload_handle,
        })
    }

    pub fn set_verbose(&self, verbose: bool) {
        let level = if verbose {
            LevelFilter::INFO
        } else {
            LevelFilter::WARN
        };

        self.reload_handle
            .modify(|filter| *filter = level)
            .unwrap_or_else(|e| tracing::error!(error = ?e, "{:?}", e));
    }
}
