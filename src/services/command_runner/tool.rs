use super::r#trait::{CommandOutput, CommandRunner};
use crate::error::{Result, XdoError};
use crate::xdo_error;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Внешняя утилита, привязанная к способу запуска
#[derive(Clone)]
pub struct Tool {
    program: String,
    runner: Arc<dyn CommandRunner>,
}

impl Tool {
    pub fn new(program: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Запуск без интерпретации результата
    pub async fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<CommandOutput> {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        self.runner.run(&self.program, &args).await
    }

    /// Запуск, который обязан завершиться успешно.
    ///
    /// Непустой stderr или ненулевой код выхода превращаются в
    /// [`XdoError::ExternalTool`]; возвращается stdout.
    pub async fn run_checked<S: AsRef<str>>(&self, args: &[S]) -> Result<String> {
        let output = self.run(args).await.map_err(|e| match e {
            XdoError::Io(io) => xdo_error!(tool self.program.as_str(), "не удалось запустить: {}", io),
            other => other,
        })?;

        let stderr = output.stderr.trim();
        if !stderr.is_empty() {
            debug!("{} вернул ошибку: {}", self.program, stderr);
            return Err(XdoError::external_tool(&self.program, stderr));
        }
        if !output.is_success() {
            return Err(xdo_error!(tool self.program.as_str(), "код выхода {:?}", output.status));
        }

        Ok(output.stdout)
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool").field("program", &self.program).finish()
    }
}
