//! # Section 模块
//!
//! 一个回合产生的条目分组。

use crate::entry::LogEntry;

/// 日志段
///
/// 一段对应一个回合的输出：一批叙述条目、一个选项列表条目，
/// 或一条玩家选择回显。构造期间只允许追加。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogSection {
    entries: Vec<LogEntry>,
}

impl LogSection {
    /// 创建空段
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建只包含一个条目的段
    pub fn with_entry(entry: LogEntry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// 追加条目
    pub fn add_entry(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// 所有条目（按插入顺序）
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// 是否包含选项列表
    pub fn has_choice_list(&self) -> bool {
        self.entries.iter().any(LogEntry::is_choice_list)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序拼接各条目的渲染结果
    pub fn render(&self, darken: f32) -> String {
        self.entries.iter().map(|e| e.render(darken)).collect()
    }
}
