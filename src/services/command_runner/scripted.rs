//! Test double: answers from a per-program script and records every call.

use super::r#trait::{CommandOutput, CommandRunner};
use crate::error::Result;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

type Responder = Box<dyn Fn(usize, &[String]) -> CommandOutput + Send + Sync>;

#[derive(Default)]
pub struct ScriptedRunner {
    queued: Mutex<HashMap<String, VecDeque<CommandOutput>>>,
    responders: Mutex<HashMap<String, Responder>>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ответы по очереди; после исчерпания очереди — успешный пустой вывод
    pub fn push(&self, program: &str, output: CommandOutput) -> &Self {
        self.queued
            .lock()
            .entry(program.to_string())
            .or_default()
            .push_back(output);
        self
    }

    /// Ответ в зависимости от номера вызова этой программы (с 1)
    pub fn respond_with<F>(&self, program: &str, f: F) -> &Self
    where
        F: Fn(usize, &[String]) -> CommandOutput + Send + Sync + 'static,
    {
        self.responders.lock().insert(program.to_string(), Box::new(f));
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, program: &str) -> usize {
        self.calls.lock().iter().filter(|(p, _)| p == program).count()
    }
}

#[async_trait::async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let n = {
            let mut calls = self.calls.lock();
            calls.push((program.to_string(), args.to_vec()));
            calls.iter().filter(|(p, _)| p == program).count()
        };

        if let Some(output) = self
            .queued
            .lock()
            .get_mut(program)
            .and_then(|queue| queue.pop_front())
        {
            return Ok(output);
        }

        if let Some(responder) = self.responders.lock().get(program) {
            return Ok(responder(n, args));
        }

        Ok(CommandOutput::success(""))
    }
}
