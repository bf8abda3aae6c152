//! # Entry 模块
//!
//! 日志中的单条可渲染记录。
//!
//! ## 变体
//!
//! - [`LogEntry::Standard`]：可选的说话者标签 + 正文，颜色在渲染时按变暗系数处理
//! - [`LogEntry::ChoiceList`]：预先构造好的选项列表标记，原样输出
//!
//! 条目本身不保存"是否活跃"的状态，变暗系数由所属日志在渲染时传入。

use crate::color::Color;
use crate::markup;

/// 标准条目内容
#[derive(Debug, Clone, PartialEq)]
pub struct StandardEntry {
    /// 说话者标签（为空时不输出标签段）
    pub title: String,
    /// 正文
    pub body: String,
    /// 标签颜色
    pub title_color: Color,
    /// 正文颜色
    pub body_color: Color,
}

/// 日志条目
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    /// 标签 + 正文
    Standard(StandardEntry),

    /// 选项列表
    ///
    /// 每个选项的颜色在构造时已根据访问记录确定，渲染时忽略变暗系数。
    ChoiceList { markup: String },
}

impl LogEntry {
    /// 创建标准条目
    pub fn standard(
        title: impl Into<String>,
        body: impl Into<String>,
        title_color: Color,
        body_color: Color,
    ) -> Self {
        Self::Standard(StandardEntry {
            title: title.into(),
            body: body.into(),
            title_color,
            body_color,
        })
    }

    /// 创建无标签条目
    pub fn untitled(body: impl Into<String>, body_color: Color) -> Self {
        Self::standard(String::new(), body, Color::BLACK, body_color)
    }

    /// 创建选项列表条目
    pub fn choice_list(markup: impl Into<String>) -> Self {
        Self::ChoiceList {
            markup: markup.into(),
        }
    }

    /// 标签文本（选项列表没有标签）
    pub fn title(&self) -> &str {
        match self {
            Self::Standard(entry) => &entry.title,
            Self::ChoiceList { .. } => "",
        }
    }

    /// 正文（选项列表返回其标记）
    pub fn body(&self) -> &str {
        match self {
            Self::Standard(entry) => &entry.body,
            Self::ChoiceList { markup } => markup,
        }
    }

    /// 是否为选项列表
    pub fn is_choice_list(&self) -> bool {
        matches!(self, Self::ChoiceList { .. })
    }

    /// 渲染为标记文本
    ///
    /// `darken` 为 0 表示完全活跃。
    pub fn render(&self, darken: f32) -> String {
        match self {
            Self::Standard(entry) => {
                let mut out = String::new();
                if !entry.title.is_empty() {
                    out.push_str(&markup::speaker_label(
                        &entry.title,
                        entry.title_color.darkened(darken),
                    ));
                }
                out.push_str(&markup::colored(
                    entry.body_color.darkened(darken),
                    &entry.body,
                ));
                out
            }
            Self::ChoiceList { markup } => markup.clone(),
        }
    }
}
