use crate::error::LoggerError;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;

/// Parses a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`), case-insensitive.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for an unknown name.
pub fn parse_level(name: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(name.trim()).map_err(|_| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{name}'").into(),
        context: None,
    })
}

/// Parses a rotation name (`minutely`, `hourly`, `daily`, `never`), case-insensitive.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for an unknown name.
pub fn parse_rotation(name: &str) -> Result<Rotation, LoggerError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "minutely" => Ok(Rotation::MINUTELY),
        "hourly" => Ok(Rotation::HOURLY),
        "daily" => Ok(Rotation::DAILY),
        "never" => Ok(Rotation::NEVER),
        _ => Err(LoggerError::InvalidConfiguration {
            message: format!("Unknown log rotation '{name}'").into(),
            context: None,
        }),
    }
}
