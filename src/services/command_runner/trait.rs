use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;

/// Результат одного запуска внешней утилиты
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None`, если процесс завершён сигналом
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Trait for running external programs: spawn, capture output, reap
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and wait for it to exit
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Factory function to create an appropriate command runner based on the dry_run flag
pub fn create_command_runner(config: &Config, dry_run: bool) -> Arc<dyn CommandRunner> {
    if dry_run {
        Arc::new(super::dry_run::DryRunRunner::new(config.tools.clone()))
    } else {
        Arc::new(super::system::SystemRunner::new())
    }
}
