use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Идентификатор окна X11.
///
/// Ноль зарезервирован как «нет окна»: даже у корневого окна другой id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(u64);

impl WindowId {
    pub const NULL: WindowId = WindowId(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Строка для передачи утилитам аргументом командной строки
    pub fn as_arg(&self) -> String {
        self.0.to_string()
    }
}

impl FromStr for WindowId {
    type Err = ParseIntError;

    /// Принимает десятичную форму (xdotool) и шестнадцатеричную с `0x` (xwininfo)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let raw = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16)?,
            None => s.parse::<u64>()?,
        };
        Ok(Self(raw))
    }
}

impl From<u64> for WindowId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_and_hex() {
        assert_eq!("4711".parse::<WindowId>().unwrap(), WindowId::new(4711));
        assert_eq!(" 0x1e3 \n".parse::<WindowId>().unwrap(), WindowId::new(0x1e3));
        assert!("abc".parse::<WindowId>().is_err());
        assert!("-1".parse::<WindowId>().is_err());
    }

    #[test]
    fn test_null_window() {
        assert!(WindowId::NULL.is_null());
        assert!(!WindowId::new(1).is_null());
        assert_eq!(WindowId::NULL.as_arg(), "0");
    }
}
