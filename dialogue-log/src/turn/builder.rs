//! # Builder 模块
//!
//! 把故事引擎的输出转换为日志段。
//!
//! ## 职责
//!
//! - 按标签识别说话者
//! - 同一段内连续同一说话者只显示一次标签
//! - 构造选项列表与玩家选择回显

use tracing::trace;

use crate::entry::LogEntry;
use crate::markup;
use crate::section::LogSection;
use crate::story::StoryChoice;
use crate::style::LogStyle;
use crate::visited::VisitedChoices;

/// 玩家标签
pub const PLAYER_TAG: &str = "Player";
/// 角色标签
pub const CHARACTER_TAG: &str = "Character";
/// 动作标签（按旁白处理）
pub const ACTION_TAG: &str = "Action";

/// 说话者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// 旁白（无标签或未识别标签）
    Narrator,
    /// 玩家
    Player,
    /// 对话角色
    Character,
}

impl Speaker {
    /// 按优先级 `Player > Character > 旁白` 识别说话者
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        let has = |tag: &str| tags.iter().any(|t| t.as_ref() == tag);

        if has(PLAYER_TAG) {
            Self::Player
        } else if has(CHARACTER_TAG) {
            Self::Character
        } else {
            if !tags.is_empty() && !has(ACTION_TAG) {
                let tags: Vec<&str> = tags.iter().map(|t| t.as_ref()).collect();
                trace!(?tags, "未识别的说话者标签，按旁白处理");
            }
            Self::Narrator
        }
    }
}

/// 叙述段构造器
pub struct NarrationBuilder<'a> {
    style: &'a LogStyle,
    character_name: &'a str,
    section: LogSection,
    last_speaker: Option<Speaker>,
}

impl<'a> NarrationBuilder<'a> {
    pub fn new(style: &'a LogStyle, character_name: &'a str) -> Self {
        Self {
            style,
            character_name,
            section: LogSection::new(),
            last_speaker: None,
        }
    }

    /// 加入一行叙述，空白行被忽略
    pub fn push_line<S: AsRef<str>>(&mut self, text: &str, tags: &[S]) {
        if text.trim().is_empty() {
            return;
        }

        let speaker = Speaker::from_tags(tags);
        let show_label = self.last_speaker != Some(speaker);
        self.last_speaker = Some(speaker);

        let (label, title_color, body_color) = match speaker {
            Speaker::Narrator => (
                "",
                self.style.narrator_title_color,
                self.style.narrator_body_color,
            ),
            Speaker::Player => (
                self.style.player_label.as_str(),
                self.style.player_title_color,
                self.style.player_body_color,
            ),
            Speaker::Character => (
                self.character_name,
                self.style.character_title_color,
                self.style.character_body_color,
            ),
        };
        let title = if show_label { label } else { "" };

        self.section.add_entry(LogEntry::standard(
            title,
            format!("{text}\n"),
            title_color,
            body_color,
        ));
    }

    pub fn finish(self) -> LogSection {
        self.section
    }
}

/// 构造选项列表标记
///
/// 已访问过的路径使用变暗后的选项颜色。
pub fn choice_list_markup(
    choices: &[StoryChoice],
    visited: &VisitedChoices,
    style: &LogStyle,
) -> String {
    markup::ordered_list(choices.iter().map(|choice| {
        let color = if visited.contains(&choice.path_id) {
            style.choice_color.darkened(style.inactive_darkening)
        } else {
            style.choice_color
        };
        markup::list_item(choice.index, &choice.text, color)
    }))
}

/// 构造玩家选择回显段
pub fn echo_section(text: &str, style: &LogStyle) -> LogSection {
    LogSection::with_entry(LogEntry::standard(
        style.player_label.clone(),
        format!("{text}\n\n"),
        style.echo_title_color,
        style.echo_body_color,
    ))
}
