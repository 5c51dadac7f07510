use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XdoError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    /// Внешняя утилита сообщила об ошибке (stderr или ненулевой код выхода)
    #[error("{tool} завершился с ошибкой: {message}")]
    ExternalTool { tool: String, message: String },

    #[error("Окно не найдено: {0}")]
    NotFound(String),

    #[error("Неожиданный формат вывода xwininfo: {0}")]
    MalformedReport(String),

    #[error("Неверный шаблон поиска: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Истекло время ожидания ({timeout:?}): {what}")]
    Timeout { what: String, timeout: Duration },
}

impl XdoError {
    pub fn external_tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        XdoError::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn not_found<T>(msg: impl Into<String>) -> Result<T> {
        Err(XdoError::NotFound(msg.into()))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, XdoError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, XdoError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! xdo_error {
    (malformed, $($arg:tt)*) => {
        $crate::error::XdoError::MalformedReport(format!($($arg)*))
    };
    (tool $tool:expr, $($arg:tt)*) => {
        $crate::error::XdoError::external_tool($tool, format!($($arg)*))
    };
}
