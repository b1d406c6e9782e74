use thiserror::Error;

/// Rejected row configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("trigger {index} is not a finite number")]
    NotFinite { index: usize },

    #[error("trigger {index} = {value} is outside (0, 1]")]
    OutOfRange { index: usize, value: f32 },

    #[error("trigger {index} = {next} must be greater than trigger {} = {prev}", .index - 1)]
    NotAscending { index: usize, prev: f32, next: f32 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
