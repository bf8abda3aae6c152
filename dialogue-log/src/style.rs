//! # Style 模块
//!
//! 日志渲染样式配置，在构造编排器时一次性传入。
//!
//! 所有字段都有默认值，配置文件中可以只写需要覆盖的部分。

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::StyleError;

/// 日志样式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogStyle {
    /// 非活跃段的变暗系数 (0.0 - 1.0)
    ///
    /// 同时用于已访问选项的变暗。
    #[serde(default = "default_inactive_darkening")]
    pub inactive_darkening: f32,

    /// 旁白标签颜色
    #[serde(default = "default_narrator_title_color")]
    pub narrator_title_color: Color,

    /// 旁白正文颜色
    #[serde(default = "default_white")]
    pub narrator_body_color: Color,

    /// 玩家标签颜色
    #[serde(default = "default_white")]
    pub player_title_color: Color,

    /// 玩家正文颜色
    #[serde(default = "default_white")]
    pub player_body_color: Color,

    /// 角色标签颜色
    #[serde(default = "default_character_color")]
    pub character_title_color: Color,

    /// 角色正文颜色
    #[serde(default = "default_character_color")]
    pub character_body_color: Color,

    /// 玩家选择回显的标签颜色
    #[serde(default = "default_echo_title_color")]
    pub echo_title_color: Color,

    /// 玩家选择回显的正文颜色
    #[serde(default = "default_white")]
    pub echo_body_color: Color,

    /// 选项颜色（未访问）
    #[serde(default = "default_choice_color")]
    pub choice_color: Color,

    /// 玩家标签文本
    #[serde(default = "default_player_label")]
    pub player_label: String,

    /// 存放角色名的故事变量名
    #[serde(default = "default_character_name_variable")]
    pub character_name_variable: String,

    /// 单回合最多拉取的叙述行数
    ///
    /// 超过即视为故事源无法终止。
    #[serde(default = "default_max_lines_per_turn")]
    pub max_lines_per_turn: usize,
}

// 默认值函数
fn default_inactive_darkening() -> f32 {
    0.3
}

fn default_white() -> Color {
    Color::WHITE
}

fn default_narrator_title_color() -> Color {
    Color::GRAY
}

fn default_character_color() -> Color {
    Color::WHEAT
}

fn default_echo_title_color() -> Color {
    Color::PINK
}

fn default_choice_color() -> Color {
    Color::RED
}

fn default_player_label() -> String {
    "You".to_string()
}

fn default_character_name_variable() -> String {
    "name".to_string()
}

fn default_max_lines_per_turn() -> usize {
    10_000
}

impl Default for LogStyle {
    fn default() -> Self {
        Self {
            inactive_darkening: default_inactive_darkening(),
            narrator_title_color: default_narrator_title_color(),
            narrator_body_color: default_white(),
            player_title_color: default_white(),
            player_body_color: default_white(),
            character_title_color: default_character_color(),
            character_body_color: default_character_color(),
            echo_title_color: default_echo_title_color(),
            echo_body_color: default_white(),
            choice_color: default_choice_color(),
            player_label: default_player_label(),
            character_name_variable: default_character_name_variable(),
            max_lines_per_turn: default_max_lines_per_turn(),
        }
    }
}

impl LogStyle {
    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), StyleError> {
        if !(0.0..=1.0).contains(&self.inactive_darkening) {
            return Err(StyleError::InvalidDarkening(self.inactive_darkening));
        }

        if self.max_lines_per_turn == 0 {
            return Err(StyleError::InvalidLineLimit);
        }

        if self.player_label.trim().is_empty() {
            return Err(StyleError::EmptyField {
                field: "player_label",
            });
        }

        if self.character_name_variable.trim().is_empty() {
            return Err(StyleError::EmptyField {
                field: "character_name_variable",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = LogStyle::default();
        assert_eq!(style.inactive_darkening, 0.3);
        assert_eq!(style.choice_color, Color::RED);
        assert_eq!(style.player_label, "You");
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let style: LogStyle =
            serde_json::from_str(r##"{ "choice_color": "#00ff00", "player_label": "Me" }"##)
                .unwrap();

        assert_eq!(style.choice_color, Color::rgb(0, 0xFF, 0));
        assert_eq!(style.player_label, "Me");
        assert_eq!(style.character_title_color, Color::WHEAT);
        assert_eq!(style.max_lines_per_turn, 10_000);
    }

    #[test]
    fn test_title_and_body_colors_are_independent() {
        let style: LogStyle =
            serde_json::from_str(r##"{ "character_title_color": "#112233" }"##).unwrap();

        assert_eq!(style.character_title_color, Color::rgb(0x11, 0x22, 0x33));
        assert_eq!(style.character_body_color, Color::WHEAT);
    }

    #[test]
    fn test_validate() {
        let mut style = LogStyle {
            inactive_darkening: 1.5,
            ..LogStyle::default()
        };
        assert_eq!(style.validate(), Err(StyleError::InvalidDarkening(1.5)));

        style.inactive_darkening = f32::NAN;
        assert!(matches!(
            style.validate(),
            Err(StyleError::InvalidDarkening(_))
        ));

        style.inactive_darkening = 0.3;
        style.max_lines_per_turn = 0;
        assert_eq!(style.validate(), Err(StyleError::InvalidLineLimit));

        style.max_lines_per_turn = 10;
        style.player_label = "  ".to_string();
        assert_eq!(
            style.validate(),
            Err(StyleError::EmptyField {
                field: "player_label"
            })
        );
    }

    #[test]
    fn test_style_round_trip() {
        let style = LogStyle::default();
        let json = serde_json::to_string_pretty(&style).unwrap();
        assert!(json.contains("\"#FFC0CB\""));

        let loaded: LogStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, style);
    }
}
