//! Tracing integration for structured logging
//!
//! This module wires the `tracing` crate into Treeline: one-shot subscriber
//! initialization with a configurable level, output and filter, plus the
//! span and field name conventions used across the stores so embedders can
//! filter on them.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Global flag indicating whether tracing has been initialized
static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Errors that can occur during tracing initialization
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    /// The subscriber failed to initialize.
    #[error("failed to initialize tracing: {0}")]
    InitializationFailed(String),

    /// Tracing was already initialized in this process.
    #[error("tracing has already been initialized")]
    AlreadyInitialized,

    /// The configured log file could not be created.
    #[error("failed to create log file: {0}")]
    FileCreationFailed(String),
}

/// Result type for tracing operations
pub type TracingResult<T> = Result<T, TracingError>;

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingLevel {
    /// Only errors
    Error,
    /// Errors and warnings
    Warn,
    /// Errors, warnings and info (default)
    #[default]
    Info,
    /// All of the above plus debug messages
    Debug,
    /// Everything including trace
    Trace,
}

impl TracingLevel {
    /// Converts to the tracing crate's `Level`.
    #[must_use]
    pub const fn to_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Output destination for log events
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Write to stdout.
    Stdout,
    /// Write to stderr.
    #[default]
    Stderr,
    /// Write to a file.
    File {
        /// Path to the log file.
        path: PathBuf,
    },
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Log level for the `treeline` targets.
    pub level: TracingLevel,
    /// Output destination.
    pub output: TracingOutput,
    /// Custom `EnvFilter` directive string; overrides `level` when set.
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the output destination.
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Sets a custom filter directive string.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Initializes the tracing subscriber.
///
/// Call once at application startup; subsequent calls fail.
///
/// # Errors
///
/// Returns an error if tracing was already initialized, the subscriber
/// fails to install, or a configured log file cannot be created.
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    if TRACING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Err(TracingError::AlreadyInitialized);
    }

    let filter = if let Some(ref custom) = config.filter {
        EnvFilter::try_new(custom).map_err(|e| TracingError::InitializationFailed(e.to_string()))?
    } else {
        EnvFilter::try_new(format!("treeline={}", config.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    match &config.output {
        TracingOutput::Stdout => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_writer(std::io::stdout),
                )
                .try_init()
                .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;
        }
        TracingOutput::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;
        }
        TracingOutput::File { path } => {
            let file = std::fs::File::create(path)
                .map_err(|e| TracingError::FileCreationFailed(e.to_string()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(file),
                )
                .try_init()
                .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;
        }
    }

    tracing::info!(level = %config.level, "tracing initialized");
    Ok(())
}

/// Returns true if tracing has been initialized.
#[must_use]
pub fn is_tracing_initialized() -> bool {
    TRACING_INITIALIZED.load(Ordering::SeqCst)
}

/// Macro for creating operation spans with consistent naming.
///
/// # Examples
///
/// ```ignore
/// use treeline_core::trace_operation;
///
/// let _span = trace_operation!("hierarchy.move", entity = %id).entered();
/// ```
#[macro_export]
macro_rules! trace_operation {
    ($name:expr) => {
        tracing::debug_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::debug_span!($name, $($field)*)
    };
}

/// Standard span names for Treeline operations
pub mod span_names {
    /// Entity relocation span
    pub const HIERARCHY_MOVE: &str = "hierarchy.move";
    /// Entity insertion span
    pub const HIERARCHY_INSERT: &str = "hierarchy.insert";
    /// Subtree removal span
    pub const HIERARCHY_REMOVE: &str = "hierarchy.remove";
    /// Drag session start span
    pub const DRAG_BEGIN: &str = "drag.begin";
    /// Drop resolution span
    pub const DRAG_DROP: &str = "drag.drop";
    /// State merge span
    pub const STATE_UPDATE: &str = "state.update";
    /// Snapshot load span
    pub const SNAPSHOT_LOAD: &str = "snapshot.load";
    /// Snapshot save span
    pub const SNAPSHOT_SAVE: &str = "snapshot.save";
}

/// Standard field names for tracing events
pub mod field_names {
    /// Entity id field
    pub const ENTITY_ID: &str = "entity";
    /// Target slot field
    pub const SLOT: &str = "slot";
    /// Removed entity count field
    pub const REMOVED_COUNT: &str = "removed";
    /// Snapshot path field
    pub const PATH: &str = "path";
}
