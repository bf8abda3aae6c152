//! # Color 模块
//!
//! RGB 颜色与变暗运算。
//!
//! 颜色在标记中统一格式化为大写 `#RRGGBB`，保证输出可复现。
//! 配置文件中以同样的字符串形式读写。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 颜色解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// 长度不是 6 位十六进制
    #[error("颜色 '{0}' 必须是 6 位十六进制（#RRGGBB）")]
    InvalidLength(String),

    /// 包含非十六进制字符
    #[error("颜色 '{0}' 包含非十六进制字符")]
    InvalidDigit(String),
}

/// RGB 颜色（不含 alpha）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const GRAY: Color = Color::rgb(0xBF, 0xBF, 0xBF);
    pub const WHEAT: Color = Color::rgb(0xF5, 0xDE, 0xB3);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const PINK: Color = Color::rgb(0xFF, 0xC0, 0xCB);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 按比例变暗
    ///
    /// 每个通道向 0 线性插值：`c * (1 - amount)`，结果四舍五入。
    /// `amount` 超出 `[0, 1]` 时截断，NaN 视为 0。
    pub fn darkened(self, amount: f32) -> Self {
        let amount = if amount.is_nan() {
            0.0
        } else {
            amount.clamp(0.0, 1.0)
        };
        if amount == 0.0 {
            return self;
        }

        let keep = 1.0 - f64::from(amount);
        let scale = |c: u8| (f64::from(c) * keep).round() as u8;
        Self::rgb(scale(self.r), scale(self.g), scale(self.b))
    }

    /// 格式化为 `#RRGGBB`（大写）
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// 解析 `#RRGGBB` 或 `RRGGBB`（不区分大小写）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(ColorParseError::InvalidLength(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
