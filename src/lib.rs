//! Обёртка над xdotool и xwininfo: поиск окон X11 по имени/классу,
//! ожидание их появления или закрытия и управление найденными окнами.

pub mod config;
pub mod error;
pub mod services;
pub mod window;

pub use config::Config;
pub use error::{Result, XdoError};
pub use services::{Desktop, WindowLocator, XWindow, Xdo};
pub use window::{InfoReport, MatchField, MatchSpec, Pattern, Position, Size, WindowId};
