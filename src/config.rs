use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub tools: ToolsConfig,
    pub wait: WaitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Пути к внешним утилитам
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    pub xdotool: String,
    pub xwininfo: String,
    pub xkill: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WaitConfig {
    pub poll_interval_ms: u64,
    pub timeout_ms: u64,
}

impl WaitConfig {
    /// Более частый опрос превращает ожидание в непрерывный запуск xdotool
    pub const MIN_POLL_INTERVAL_MS: u64 = 10;

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Интервал из командной строки, если задан, иначе из конфигурации
    pub fn poll_interval_or(&self, override_ms: Option<u64>) -> Result<Duration> {
        let ms = override_ms.unwrap_or(self.poll_interval_ms);
        check_poll_interval(ms)?;
        Ok(Duration::from_millis(ms))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "compact".to_string(),
            },
            tools: ToolsConfig {
                xdotool: "xdotool".to_string(),
                xwininfo: "xwininfo".to_string(),
                xkill: "xkill".to_string(),
            },
            wait: WaitConfig {
                poll_interval_ms: 500,
                timeout_ms: 30_000,
            },
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        // Отсутствующий файл не ошибка: остаются значения по умолчанию
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("XDO_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "compact" | "full" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        for (name, program) in [
            ("xdotool", &self.tools.xdotool),
            ("xwininfo", &self.tools.xwininfo),
            ("xkill", &self.tools.xkill),
        ] {
            if program.trim().is_empty() {
                anyhow::bail!("Пустой путь к утилите {}", name);
            }
        }

        check_poll_interval(self.wait.poll_interval_ms)?;

        if self.wait.timeout_ms == 0 {
            anyhow::bail!("timeout_ms должно быть больше 0");
        }

        Ok(())
    }
}

fn check_poll_interval(ms: u64) -> Result<()> {
    if ms < WaitConfig::MIN_POLL_INTERVAL_MS {
        anyhow::bail!(
            "Интервал опроса должен быть минимум {} мс, получено {}",
            WaitConfig::MIN_POLL_INTERVAL_MS,
            ms
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.wait.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.wait.poll_interval_ms = 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.wait.timeout_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tools.xwininfo = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_poll_interval_override_checked() {
        let wait = Config::default().wait;
        assert_eq!(wait.poll_interval_or(None).unwrap(), Duration::from_millis(500));
        assert_eq!(wait.poll_interval_or(Some(10)).unwrap(), Duration::from_millis(10));
        assert!(wait.poll_interval_or(Some(0)).is_err());
        assert!(wait.poll_interval_or(Some(9)).is_err());
    }

    #[test]
    fn test_load_merges_file_over_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "xdo.toml",
                r#"
                [wait]
                poll_interval_ms = 100

                [tools]
                xdotool = "/opt/bin/xdotool"
                "#,
            )?;

            let config = Config::load("xdo.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.wait.poll_interval_ms, 100);
            assert_eq!(config.wait.timeout_ms, 30_000);
            assert_eq!(config.tools.xdotool, "/opt/bin/xdotool");
            assert_eq!(config.tools.xwininfo, "xwininfo");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("xdo.toml", "[wait]\ntimeout_ms = 1000\n")?;
            jail.set_env("XDO_WAIT__TIMEOUT_MS", "2500");

            let config = Config::load("xdo.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.wait.timeout_ms, 2500);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load("missing.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.logging.level, "info");
            Ok(())
        });
    }
}
