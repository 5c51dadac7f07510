use super::r#trait::{CommandOutput, CommandRunner};
use crate::error::Result;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Запуск настоящих процессов через tokio
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        debug!("Запуск: {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                debug!("{} не найден или не запускается: {}", program, e);
                e
            })?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(
            "{} завершился со статусом {:?} (stdout: {} байт, stderr: {} байт)",
            program,
            result.status,
            result.stdout.len(),
            result.stderr.len()
        );

        Ok(result)
    }
}
