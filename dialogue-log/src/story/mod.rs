//! # Story 模块
//!
//! 故事引擎接口。日志核心不关心叙述来自哪里，只通过 [`StoryEngine`]
//! 拉取文本、标签与选项，并把玩家的选择回传给引擎。
//!
//! ## 模块结构
//!
//! - [`scripted`]：基于 JSON 描述的内存故事引擎（用于测试与命令行宿主）

pub mod scripted;

use serde::{Deserialize, Serialize};

use crate::error::StoryError;

pub use scripted::{Knot, ScriptChoice, ScriptIssue, ScriptLine, ScriptedStory, StoryScript};

/// 故事变量值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    /// 布尔值
    Bool(bool),
    /// 整数
    Int(i64),
    /// 浮点数
    Float(f64),
    /// 字符串
    String(String),
}

impl VarValue {
    /// 取字符串值
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// 当前可选的一个选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryChoice {
    /// 选项在当前选项集中的索引（从 0 开始）
    pub index: usize,
    /// 显示文本
    pub text: String,
    /// 分支路径标识，用于判断是否访问过
    pub path_id: String,
}

impl StoryChoice {
    pub fn new(index: usize, text: impl Into<String>, path_id: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            path_id: path_id.into(),
        }
    }
}

/// 故事引擎
///
/// 每个回合内 `can_continue` 必须在有限次 `continue_once` 后返回 `false`。
pub trait StoryEngine {
    /// 是否还有可拉取的叙述
    fn can_continue(&self) -> bool;

    /// 推进一步，返回这一行文本
    fn continue_once(&mut self) -> Result<String, StoryError>;

    /// 最近一行的标签
    fn current_tags(&self) -> Vec<String>;

    /// 当前选项（按显示顺序）
    fn current_choices(&self) -> Vec<StoryChoice>;

    /// 选择一个选项
    fn choose_index(&mut self, index: usize) -> Result<(), StoryError>;

    /// 读取故事变量
    fn fetch_variable(&self, name: &str) -> Option<VarValue>;

    /// 读取字符串变量
    fn fetch_string(&self, name: &str) -> Option<String> {
        self.fetch_variable(name)
            .and_then(|v| v.as_str().map(str::to_string))
    }
}
