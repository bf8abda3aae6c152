//! # Error 模块
//!
//! 定义 dialogue-log 中使用的错误类型。

use thiserror::Error;

/// 日志 / 回合编排错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LogError {
    /// 历史为空，无法追加条目或替换最后一段
    #[error("日志历史为空")]
    EmptyHistory,

    /// 无效的选择索引
    #[error("无效的选择索引 {index}，有效范围是 0..{max}")]
    InvalidChoice { index: usize, max: usize },

    /// 会话已结束
    #[error("会话已结束，不再接受选择")]
    SessionFinished,

    /// 状态不匹配
    #[error("当前状态不允许此操作：期望 {expected}，实际 {actual}")]
    StateMismatch { expected: String, actual: String },

    /// 单个回合内叙述行数超过上限（故事源未能终止）
    #[error("单回合叙述超过 {limit} 行，故事源未终止")]
    NarrationOverrun { limit: usize },

    /// 故事引擎错误
    #[error("故事引擎错误: {0}")]
    Story(#[from] StoryError),

    /// 样式配置无效
    #[error("样式配置无效: {0}")]
    Style(#[from] StyleError),
}

/// 故事引擎错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoryError {
    /// 起始节点不存在
    #[error("起始节点 '{knot}' 不存在")]
    MissingStart { knot: String },

    /// 跳转目标节点不存在
    #[error("节点 '{knot}' 未找到")]
    UnknownKnot { knot: String },

    /// 无效的选择索引
    #[error("无效的选择索引 {index}，有效范围是 0..{max}")]
    InvalidChoice { index: usize, max: usize },

    /// 当前没有待选择的选项
    #[error("当前没有待选择的选项")]
    NoChoicesPending,

    /// 叙述已耗尽，无法继续
    #[error("叙述已耗尽，无法继续")]
    Exhausted,
}

/// 样式配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    /// 变暗系数不在 0.0 - 1.0 之间
    #[error("变暗系数必须在 0.0 - 1.0 之间，实际为 {0}")]
    InvalidDarkening(f32),

    /// 单回合行数上限为 0
    #[error("单回合叙述行数上限必须大于 0")]
    InvalidLineLimit,

    /// 字段为空
    #[error("配置项 '{field}' 不能为空")]
    EmptyField { field: &'static str },
}

/// Result 类型别名
pub type LogResult<T> = Result<T, LogError>;
