//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` events under the `kaizen_client`
//! target; applications (and the demos) pick how to render them.
//!
//! ```rust,no_run
//! use kaizen_client::telemetry::{OutputFormat, SubscriberConfig, init_subscriber};
//!
//! let config = SubscriberConfig::builder()
//!     .log_level(tracing::Level::DEBUG)
//!     .output_format(OutputFormat::Json)
//!     .build();
//! let _guard = init_subscriber(config)?;
//! # Ok::<(), kaizen_client::KaizenError>(())
//! ```

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

use crate::env;
use crate::error::{KaizenError, Result};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON object per event
    Json,
    /// JSON with span lists flattened
    JsonCompact,
}

impl std::str::FromStr for OutputFormat {
    type Err = KaizenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" | "json_compact" => Ok(Self::JsonCompact),
            other => Err(KaizenError::ConfigurationError(format!(
                "Invalid log format: {other}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

/// Subscriber configuration.
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
    /// Write to stderr
    pub enable_console: bool,
    /// Also write to this file through a non-blocking appender
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            enable_console: true,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    enable_console: Option<bool>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Parse `trace|debug|info|warn|error`.
    pub fn log_level_str(mut self, level: &str) -> Result<Self> {
        let parsed = match level.trim().to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => {
                return Err(KaizenError::ConfigurationError(format!(
                    "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
                )));
            }
        };
        self.log_level = Some(parsed);
        Ok(self)
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn enable_console(mut self, enable: bool) -> Self {
        self.enable_console = Some(enable);
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            enable_console: self.enable_console.unwrap_or(true),
            log_file: self.log_file,
        }
    }
}

/// Install the global subscriber.
///
/// Returns the appender guard when a log file is configured; keep it alive
/// or buffered lines are lost. An already-installed global subscriber is not
/// an error, so this is safe to call more than once.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>> {
    let filter = format!(
        "kaizen_client={}",
        config.log_level.as_str().to_lowercase()
    );

    let (writer, guard) = make_writer(&config)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(writer);
    let init_result = match config.output_format {
        OutputFormat::Json => builder
            .with_thread_ids(true)
            .with_thread_names(true)
            .json()
            .try_init(),
        OutputFormat::JsonCompact => builder
            .with_thread_ids(true)
            .with_thread_names(true)
            .json()
            .flatten_event(true)
            .with_span_list(false)
            .try_init(),
        OutputFormat::Text => builder.with_ansi(config.log_file.is_none()).try_init(),
    };

    match init_result {
        Ok(()) => Ok(guard),
        Err(e) if e.to_string().contains("has already been set") => {
            tracing::debug!(target: "kaizen_client::telemetry", "global subscriber already installed");
            Ok(guard)
        }
        Err(e) => Err(KaizenError::InternalError(format!(
            "Failed to initialize tracing: {e}"
        ))),
    }
}

fn make_writer(config: &SubscriberConfig) -> Result<(BoxMakeWriter, Option<WorkerGuard>)> {
    let Some(path) = &config.log_file else {
        let writer = if config.enable_console {
            BoxMakeWriter::new(std::io::stderr)
        } else {
            BoxMakeWriter::new(std::io::sink)
        };
        return Ok((writer, None));
    };

    let (dir, file_name) = split_log_path(path)?;
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let writer = if config.enable_console {
        BoxMakeWriter::new(non_blocking.and(std::io::stderr))
    } else {
        BoxMakeWriter::new(non_blocking)
    };
    Ok((writer, Some(guard)))
}

fn split_log_path(path: &Path) -> Result<(PathBuf, std::ffi::OsString)> {
    let file_name = path.file_name().ok_or_else(|| {
        KaizenError::ConfigurationError(format!("Log file path has no file name: {}", path.display()))
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name.to_os_string()))
}

pub fn init_default() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::default())
}

pub fn init_debug() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::debug())
}

/// Build a [`SubscriberConfig`] from `KAIZEN_LOG_LEVEL`, `KAIZEN_LOG_FORMAT`
/// and `KAIZEN_LOG_FILE`.
pub fn config_from_env() -> Result<SubscriberConfig> {
    let mut builder = SubscriberConfig::builder();
    if let Some(level) = env::optional_env(env::KAIZEN_LOG_LEVEL) {
        builder = builder.log_level_str(&level)?;
    }
    if let Some(format) = env::optional_env(env::KAIZEN_LOG_FORMAT) {
        builder = builder.output_format(format.parse()?);
    }
    if let Some(path) = env::optional_env(env::KAIZEN_LOG_FILE) {
        builder = builder.log_file(path);
    }
    Ok(builder.build())
}

pub fn init_from_env() -> Result<Option<WorkerGuard>> {
    init_subscriber(config_from_env()?)
}
