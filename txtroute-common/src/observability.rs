//! Shared observability helpers for the binary and integration tests.
//!
//! [`init_logging`] installs the global `tracing` subscriber, writing to a
//! daily rolling file and optionally mirroring to `stderr`. Stdout is left
//! alone so the CLI can print parse results there.
//!
//! The returned [`LogHandle`] owns the background writer. Keep it alive for
//! as long as events should reach the file; dropping it flushes what is
//! still buffered.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Utc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Environment variable consulted when no explicit log directory is given.
pub const LOG_DIR_ENV: &str = "TXTROUTE_LOG_DIR";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Output encoding for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Logical name of the component (used for defaults and file names).
    pub app_name: &'static str,
    /// Optional explicit directory for log output. If `None`, we consult
    /// `TXTROUTE_LOG_DIR` and finally fall back to the platform data dir.
    pub log_dir: Option<PathBuf>,
    /// Whether to duplicate events to `stderr` in addition to the file sink.
    pub emit_stderr: bool,
    pub format: LogFormat,
    /// Default filter applied when `RUST_LOG` is unset.
    pub default_filter: &'static str,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "txtroute",
            log_dir: None,
            emit_stderr: false,
            format: LogFormat::Text,
            default_filter: "info",
        }
    }
}

/// Keeps the file writer running; see the module docs.
#[must_use = "dropping the handle stops the log writer"]
#[derive(Debug)]
pub struct LogHandle {
    path: PathBuf,
    _guard: Option<WorkerGuard>,
}

impl LogHandle {
    /// File the subscriber writes to today.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Only the first call installs anything. Later calls get a handle that
/// carries the same path but owns no writer.
pub fn init_logging(config: LogConfig) -> anyhow::Result<LogHandle> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(LogHandle {
            path: path.clone(),
            _guard: None,
        });
    }

    let dir = resolve_log_dir(config.app_name, config.log_dir.as_deref());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let prefix = format!("{}.log", config.app_name);
    let appender = rolling::daily(&dir, &prefix);
    // The appender rotates and names files on the UTC date.
    let path = dir.join(dated_file_name(&prefix, Utc::now()));
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let json = config.format == LogFormat::Json;
    let mut layers: Vec<BoxedLayer> = vec![if json {
        fmt::layer().json().with_writer(writer).boxed()
    } else {
        fmt::layer().with_writer(writer).with_ansi(false).boxed()
    }];
    if config.emit_stderr {
        layers.push(if json {
            fmt::layer().json().with_writer(std::io::stderr).boxed()
        } else {
            fmt::layer().with_writer(std::io::stderr).boxed()
        });
    }
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_filter));

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    tracing::debug!(path = %path.display(), "logging initialised");
    let _ = LOG_PATH.set(path.clone());
    Ok(LogHandle {
        path,
        _guard: Some(guard),
    })
}

fn dated_file_name(prefix: &str, now: chrono::DateTime<Utc>) -> String {
    format!("{prefix}.{}", now.format("%Y-%m-%d"))
}

fn resolve_log_dir(app_name: &str, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(dir) => expand_home(dir),
        None => match std::env::var_os(LOG_DIR_ENV) {
            Some(env_dir) => expand_home(Path::new(&env_dir)),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(app_name),
        },
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
