//! # Visited 模块
//!
//! 已选择过的分支路径记录。整个会话内只增不减，
//! 仅用于在选项再次出现时挑选更暗的颜色。

use std::collections::BTreeSet;

/// 已访问的选项路径集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedChoices {
    paths: BTreeSet<String>,
}

impl VisitedChoices {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录路径，首次记录时返回 `true`
    pub fn insert(&mut self, path_id: impl Into<String>) -> bool {
        self.paths.insert(path_id.into())
    }

    pub fn contains(&self, path_id: &str) -> bool {
        self.paths.contains(path_id)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// 按字典序遍历
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}
