//! # Manager 模块
//!
//! 日志历史容器。
//!
//! ## 设计原则
//!
//! - 历史只追加，唯一例外是 [`LogManager::replace_last_section`]
//! - 只有最后一段是活跃的，其余段在渲染时统一变暗
//! - 相同的段序列与相同的变暗系数必定产生逐字节相同的输出

use tracing::trace;

use crate::entry::LogEntry;
use crate::error::{LogError, LogResult};
use crate::section::LogSection;

/// 日志历史
#[derive(Debug, Clone, PartialEq)]
pub struct LogManager {
    /// 段列表（按时间顺序）
    sections: Vec<LogSection>,
    /// 非活跃段的变暗系数
    inactive_darkening: f32,
}

impl LogManager {
    /// 创建空历史
    pub fn new(inactive_darkening: f32) -> Self {
        Self {
            sections: Vec::new(),
            inactive_darkening,
        }
    }

    /// 追加一段
    pub fn append_section(&mut self, section: LogSection) {
        trace!(entries = section.len(), index = self.sections.len(), "追加日志段");
        self.sections.push(section);
    }

    /// 向最后一段追加条目
    pub fn append_entry_to_last(&mut self, entry: LogEntry) -> LogResult<()> {
        let last = self.sections.last_mut().ok_or(LogError::EmptyHistory)?;
        last.add_entry(entry);
        Ok(())
    }

    /// 替换最后一段（先弹出再压入，段数不变）
    ///
    /// 返回被替换掉的段。
    pub fn replace_last_section(&mut self, section: LogSection) -> LogResult<LogSection> {
        let old = self.sections.pop().ok_or(LogError::EmptyHistory)?;
        self.sections.push(section);
        Ok(old)
    }

    /// 渲染完整历史
    pub fn render(&self) -> String {
        let last = self.sections.len().saturating_sub(1);
        self.sections
            .iter()
            .enumerate()
            .map(|(i, section)| section.render(self.darken_for(i, last)))
            .collect()
    }

    fn darken_for(&self, index: usize, last: usize) -> f32 {
        if index == last {
            0.0
        } else {
            self.inactive_darkening
        }
    }

    /// 所有段
    pub fn sections(&self) -> &[LogSection] {
        &self.sections
    }

    /// 最后一段
    pub fn last_section(&self) -> Option<&LogSection> {
        self.sections.last()
    }

    /// 最后一段是否为待选择的选项列表
    pub fn has_pending_choices(&self) -> bool {
        self.last_section().is_some_and(LogSection::has_choice_list)
    }

    pub fn inactive_darkening(&self) -> f32 {
        self.inactive_darkening
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
