use crate::error::{Result, XdoError};
use crate::services::xdotool::Xdotool;
use crate::window::{MatchSpec, WindowId};
use std::future::Future;
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, info, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Поиск окон по шаблону и ожидание их появления/закрытия
#[derive(Debug, Clone)]
pub struct WindowLocator {
    xdotool: Xdotool,
    poll_interval: Duration,
}

/// Один id на строку; мусор и нулевой id пропускаются
pub fn parse_search_output(stdout: &str) -> Vec<WindowId> {
    stdout
        .lines()
        .filter_map(|line| line.trim().parse::<WindowId>().ok())
        .filter(|id| !id.is_null())
        .collect()
}

impl WindowLocator {
    pub fn new(xdotool: Xdotool) -> Self {
        Self {
            xdotool,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Все окна, подходящие под `spec`, в порядке вывода xdotool.
    ///
    /// Никогда не возвращает ошибку: любой сбой утилиты означает «ничего не найдено».
    pub async fn search(&self, spec: &MatchSpec) -> Vec<WindowId> {
        let output = match self.xdotool.search(spec).await {
            Ok(output) => output,
            Err(e) => {
                warn!("xdotool search не запустился ({}), считаем что окон нет", e);
                return Vec::new();
            }
        };

        let stderr = output.stderr.trim();
        if !stderr.is_empty() {
            debug!("xdotool search {}: {}", spec, stderr);
        }

        // xdotool выходит с кодом 1, когда совпадений нет
        if !output.is_success() {
            return Vec::new();
        }

        let ids = parse_search_output(&output.stdout);
        debug!("Найдено окон для {}: {}", spec, ids.len());
        ids
    }

    pub async fn exists(&self, spec: &MatchSpec) -> bool {
        !self.search(spec).await.is_empty()
    }

    /// Первое найденное окно или [`XdoError::NotFound`]
    pub async fn resolve_first(&self, spec: &MatchSpec) -> Result<WindowId> {
        match self.search(spec).await.first() {
            Some(id) => Ok(*id),
            None => XdoError::not_found(format!("{}", spec)),
        }
    }

    /// Ждёт появления окна и возвращает первое совпадение.
    ///
    /// Собственного таймаута нет: отмена происходит сбросом future
    /// (например через `tokio::time::timeout`) во время паузы между опросами.
    pub async fn wait_for_appearance(&self, spec: &MatchSpec) -> WindowId {
        let mut polls = 0u32;
        loop {
            if let Some(id) = self.search(spec).await.first() {
                info!("Окно {} появилось: {} (опросов: {})", spec, id, polls + 1);
                return *id;
            }
            polls += 1;
            sleep(self.poll_interval).await;
        }
    }

    /// Ждёт, пока не останется ни одного подходящего окна
    pub async fn wait_for_disappearance(&self, spec: &MatchSpec) {
        let mut polls = 0u32;
        while self.exists(spec).await {
            polls += 1;
            sleep(self.poll_interval).await;
        }
        info!("Окно {} закрыто (опросов: {})", spec, polls + 1);
    }

    pub async fn wait_for_appearance_within(
        &self,
        spec: &MatchSpec,
        deadline: Duration,
    ) -> Result<WindowId> {
        with_deadline(self.wait_for_appearance(spec), deadline, || {
            format!("появление окна {}", spec)
        })
        .await
    }

    pub async fn wait_for_disappearance_within(
        &self,
        spec: &MatchSpec,
        deadline: Duration,
    ) -> Result<()> {
        with_deadline(self.wait_for_disappearance(spec), deadline, || {
            format!("закрытие окна {}", spec)
        })
        .await
    }
}

async fn with_deadline<T>(
    wait: impl Future<Output = T>,
    deadline: Duration,
    what: impl FnOnce() -> String,
) -> Result<T> {
    timeout(deadline, wait).await.map_err(|_| {
        let what = what();
        warn!("Истекло время ожидания ({:?}): {}", deadline, what);
        XdoError::Timeout {
            what,
            timeout: deadline,
        }
    })
}
