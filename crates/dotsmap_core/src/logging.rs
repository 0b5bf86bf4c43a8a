//! Process logging bootstrap.
//!
//! # Responsibility
//! - Start rolling file logs for the map engine once per process.
//! - Optionally echo the same events to stderr for CLI runs.
//! - Capture panics as single sanitized log lines.
//!
//! # Invariants
//! - Init is idempotent for identical [`LogSettings`].
//! - Init never panics.
//! - A second init with different settings is rejected.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "dotsmap";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const PANIC_PAYLOAD_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

pub type LoggingResult<T> = Result<T, LoggingError>;

/// Logging setup error.
#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    InvalidDirectory { path: String, reason: &'static str },
    CreateDirectory { path: PathBuf, source: std::io::Error },
    AlreadyActive { active: LogSettings, requested: LogSettings },
    Backend(String),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidDirectory { path, reason } => {
                write!(f, "invalid log directory `{path}`: {reason}")
            }
            Self::CreateDirectory { path, source } => {
                write!(f, "cannot create log directory `{}`: {source}", path.display())
            }
            Self::AlreadyActive { active, requested } => write!(
                f,
                "logging already active as {active}; refusing to switch to {requested}"
            ),
            Self::Backend(message) => write!(f, "logger backend failed: {message}"),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDirectory { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    level: LevelFilter,
    log_dir: PathBuf,
    echo_to_stderr: bool,
}

impl LogSettings {
    /// Parses `level` and checks that `log_dir` is a non-blank absolute path.
    pub fn new(level: &str, log_dir: impl AsRef<Path>) -> LoggingResult<Self> {
        Ok(Self {
            level: parse_level(level)?,
            log_dir: absolute_dir(log_dir.as_ref())?,
            echo_to_stderr: false,
        })
    }

    /// Also writes every event at or above the file level to stderr.
    pub fn echo_to_stderr(mut self, echo: bool) -> Self {
        self.echo_to_stderr = echo;
        self
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

impl Display for LogSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "level={} dir={} stderr={}",
            self.level,
            self.log_dir.display(),
            self.echo_to_stderr
        )
    }
}

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Starts logging with `settings`, or confirms they are already active.
pub fn init_logging(settings: &LogSettings) -> LoggingResult<()> {
    let active = ACTIVE.get_or_try_init(|| start(settings))?;
    if active.settings == *settings {
        return Ok(());
    }
    Err(LoggingError::AlreadyActive {
        active: active.settings.clone(),
        requested: settings.clone(),
    })
}

/// Settings of the running logger, if any.
pub fn logging_status() -> Option<LogSettings> {
    ACTIVE.get().map(|active| active.settings.clone())
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(settings: &LogSettings) -> LoggingResult<ActiveLogger> {
    std::fs::create_dir_all(&settings.log_dir).map_err(|source| LoggingError::CreateDirectory {
        path: settings.log_dir.clone(),
        source,
    })?;

    let echo = if settings.echo_to_stderr {
        duplicate_for(settings.level)
    } else {
        Duplicate::None
    };
    let handle = Logger::try_with_str(settings.level.as_str())
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(
            FileSpec::default()
                .directory(settings.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .duplicate_to_stderr(echo)
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook();
    info!(
        "event=engine_start module=core status=ok version={} {}",
        env!("CARGO_PKG_VERSION"),
        settings
    );

    Ok(ActiveLogger {
        settings: settings.clone(),
        _handle: handle,
    })
}

fn duplicate_for(level: LevelFilter) -> Duplicate {
    match level {
        LevelFilter::Off => Duplicate::None,
        LevelFilter::Error => Duplicate::Error,
        LevelFilter::Warn => Duplicate::Warn,
        LevelFilter::Info => Duplicate::Info,
        LevelFilter::Debug => Duplicate::Debug,
        LevelFilter::Trace => Duplicate::Trace,
    }
}

fn parse_level(raw: &str) -> LoggingResult<LevelFilter> {
    let level = raw.trim().to_ascii_lowercase();
    match level.as_str() {
        "warning" => Ok(LevelFilter::Warn),
        "off" | "" => Err(LoggingError::UnknownLevel(level)),
        other => other
            .parse::<LevelFilter>()
            .map_err(|_| LoggingError::UnknownLevel(level.clone())),
    }
}

fn absolute_dir(path: &Path) -> LoggingResult<PathBuf> {
    let text = path.to_string_lossy();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LoggingError::InvalidDirectory {
            path: trimmed.to_string(),
            reason: "path is empty",
        });
    }
    let dir = PathBuf::from(trimmed);
    if !dir.is_absolute() {
        return Err(LoggingError::InvalidDirectory {
            path: trimmed.to_string(),
            reason: "path must be absolute",
        });
    }
    Ok(dir)
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        error!(
            "event=panic module=core status=error location={} payload={}",
            location,
            one_line(payload, PANIC_PAYLOAD_LIMIT)
        );
        previous(panic_info);
    }));
}

/// Flattens line breaks and caps the text at `limit` characters.
fn one_line(text: &str, limit: usize) -> String {
    let mut chars = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c });
    let mut out: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        out.push_str("...");
    }
    out
}
