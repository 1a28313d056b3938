//! Определения ошибок для GraphDSL.

use crate::parser::error::ParseError;
use thiserror::Error;

/// Основной тип `Result` для библиотеки.
pub type GraphResult<T> = Result<T, GraphError>;

/// Перечисление всех возможных ошибок.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Compilation failed: {0}")]
    Parse(#[from] ParseError),

    #[error("Name '{0}' is not defined")]
    UndefinedName(String),

    #[error("Parameter '{0}' is not defined")]
    UndefinedParameter(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl GraphError {
    /// Ошибка возникла при компиляции (а не при построении).
    pub fn is_compile_error(&self) -> bool {
        matches!(self, GraphError::Parse(_))
    }
}
