use crate::error::Result;
use crate::services::command_runner::Tool;
use crate::window::{InfoReport, Position, Size, WindowId};
use crate::xdo_error;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^xwininfo: Window id:\s*(\S+)").expect("header regex is valid")
});

/// Типизированная обёртка над xwininfo
#[derive(Debug, Clone)]
pub struct Xwininfo {
    tool: Tool,
}

impl Xwininfo {
    pub fn new(tool: Tool) -> Self {
        Self { tool }
    }

    pub async fn report(&self, id: WindowId) -> Result<InfoReport> {
        let out = self.tool.run_checked(&["-id", id.as_arg().as_str()]).await?;
        parse_info_report(&out)
    }

    /// Окно существует, если xwininfo его находит
    pub async fn id_exists(&self, id: WindowId) -> bool {
        match self.tool.run(&["-id", id.as_arg().as_str()]).await {
            Ok(output) => output.is_success(),
            Err(_) => false,
        }
    }

    pub async fn root_id(&self) -> Result<WindowId> {
        let out = self.tool.run_checked(&["-root"]).await?;
        parse_root_id(&out)
    }
}

/// Значение после последнего `:` в строке вида `  Width: 500`; метка обязана совпасть
fn field<T: FromStr>(lines: &[&str], index: usize, name: &str) -> Result<T> {
    let line = lines
        .get(index)
        .ok_or_else(|| xdo_error!(malformed, "нет строки {} ({})", index + 1, name))?;
    if !line.contains(name) {
        return Err(xdo_error!(malformed, "строка {} должна содержать {}: '{}'", index + 1, name, line.trim()));
    }
    line.rsplit(':')
        .next()
        .map(str::trim)
        .and_then(|value| value.parse::<T>().ok())
        .ok_or_else(|| xdo_error!(malformed, "строка {} не содержит {}: '{}'", index + 1, name, line.trim()))
}

/// Разбор отчёта `xwininfo -id`.
///
/// Формат позиционный: заголовок с названием в кавычках, пустая строка,
/// затем абсолютные X/Y, относительные X/Y, ширина и высота.
pub fn parse_info_report(text: &str) -> Result<InfoReport> {
    let lines: Vec<&str> = text.trim().lines().collect();

    let header = lines.first().copied().unwrap_or_default();
    if !HEADER.is_match(header) {
        return Err(xdo_error!(malformed, "нет заголовка окна: '{}'", header));
    }
    let title = match (header.find('"'), header.rfind('"')) {
        (Some(start), Some(end)) if end > start => Some(header[start + 1..end].to_string()),
        _ => None,
    };

    Ok(InfoReport {
        title,
        absolute: Position::new(
            field(&lines, 2, "Absolute upper-left X")?,
            field(&lines, 3, "Absolute upper-left Y")?,
        ),
        relative: Position::new(
            field(&lines, 4, "Relative upper-left X")?,
            field(&lines, 5, "Relative upper-left Y")?,
        ),
        size: Size::new(field(&lines, 6, "Width")?, field(&lines, 7, "Height")?),
        mapped: text.contains("IsViewable"),
    })
}

/// Идентификатор из заголовка `xwininfo -root`
pub fn parse_root_id(text: &str) -> Result<WindowId> {
    let header = text.trim().lines().next().unwrap_or_default();
    HEADER
        .captures(header)
        .and_then(|caps| caps[1].parse::<WindowId>().ok())
        .ok_or_else(|| xdo_error!(malformed, "не удалось найти id корневого окна: '{}'", header))
}
