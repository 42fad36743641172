use crate::Logger;
use crate::error::{LoggerError, LoggerErrorExt};
use private::Sealed;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// The builder has no name yet.
#[derive(Debug, Default)]
pub struct NoName;
/// The builder carries the process name.
#[derive(Debug)]
pub struct WithName(String);
/// Console output only.
#[derive(Debug, Default)]
pub struct NoFile;
/// Rolling file output is configured.
#[derive(Debug)]
pub struct WithFile(FileOutput);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

#[derive(Debug)]
struct FileOutput {
    directory: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl FileOutput {
    fn open(&self, name: &str) -> Result<(NonBlocking, WorkerGuard), LoggerError> {
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }

        fs::create_dir_all(&self.directory)
            .context(format!("Failed to create {}", self.directory.display()))?;

        let appender = RollingFileAppender::builder()
            .rotation(self.rotation.clone())
            .filename_prefix(name)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(self.max_files)
            .build(&self.directory)?;

        Ok(tracing_appender::non_blocking(appender))
    }
}

/// Typestate builder for the global subscriber.
///
/// A name is required before [`LoggerBuilder::init`] is available, and file settings
/// (rotation, retention, JSON) only exist after [`LoggerBuilder::path`].
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    name: N,
    files: F,
    level: LevelFilter,
    directives: Option<String>,
    console: bool,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            name: NoName,
            files: NoFile,
            level: LevelFilter::INFO,
            directives: None,
            console: true,
        }
    }
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Names the process; the name also prefixes log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder {
            name: WithName(name.into()),
            files: self.files,
            level: self.level,
            directives: self.directives,
            console: self.console,
        }
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    /// Default level for targets without a directive.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Directives such as `warn,lineage_record=trace`. When set, `RUST_LOG` is ignored.
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    /// Toggles the stderr layer.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.directives {
            None => Ok(builder.from_env_lossy()),
            Some(directives) => {
                builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{directives}': {e}").into(),
                    context: None,
                })
            },
        }
    }

    fn install(&self, files: Option<&FileOutput>) -> Result<Logger, LoggerError> {
        let name = self.name.0.trim();
        if name.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }
        if !self.console && files.is_none() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        let filter = self.filter()?;
        let console = self.console.then(|| fmt::layer().compact().with_writer(io::stderr));

        let (file, flush) = match files {
            Some(output) => {
                let (writer, guard) = output.open(name)?;
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                let layer = if output.json { layer.json().boxed() } else { layer.boxed() };
                (Some(layer), Some(guard))
            },
            None => (None, None),
        };

        tracing_subscriber::registry().with(filter).with(console).with(file).try_init()?;

        Ok(Logger::new(flush))
    }
}

impl LoggerBuilder<WithName, NoFile> {
    /// Adds rolling files under `directory`, rotated daily by default.
    pub fn path(self, directory: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        LoggerBuilder {
            name: self.name,
            files: WithFile(FileOutput {
                directory: directory.into(),
                rotation: Rotation::DAILY,
                max_files: DEFAULT_MAX_FILES,
                json: false,
            }),
            level: self.level,
            directives: self.directives,
            console: self.console,
        }
    }

    /// Installs the subscriber with console output only.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for a blank name, invalid directives
    /// or a disabled console, and [`LoggerError::Subscriber`] if a global subscriber
    /// is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.install(None)
    }
}

impl LoggerBuilder<WithName, WithFile> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.files.0.rotation = rotation;
        self
    }

    /// Number of rolled files kept; older ones are deleted on rollover.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.files.0.max_files = max;
        self
    }

    /// Writes JSON lines instead of plain text.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.files.0.json = enabled;
        self
    }

    /// Creates the log directory and installs the subscriber.
    ///
    /// # Errors
    /// Same as the console-only `init`, plus [`LoggerError::InvalidConfiguration`] for
    /// `max_files == 0`, [`LoggerError::Io`] if the directory cannot be created and
    /// [`LoggerError::Appender`] if the log file cannot be opened.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.install(Some(&self.files.0))
    }
}
