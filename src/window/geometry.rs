use serde::{Deserialize, Serialize};
use std::fmt;

/// Координаты левого верхнего угла окна
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Разобранный отчёт `xwininfo -id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoReport {
    /// `None` для окна без имени
    pub title: Option<String>,
    pub absolute: Position,
    pub relative: Position,
    pub size: Size,
    /// Окно отображается (Map State: IsViewable)
    pub mapped: bool,
}

impl fmt::Display for InfoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" at {} (rel {}) size {}{}",
            self.title.as_deref().unwrap_or(""),
            self.absolute,
            self.relative,
            self.size,
            if self.mapped { "" } else { " [unmapped]" }
        )
    }
}
