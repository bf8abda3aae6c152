//! # State 模块
//!
//! 回合状态与回合结果。
//!
//! ```text
//! AwaitingNarration --叙述拉取完毕--> AwaitingChoice
//! AwaitingChoice    --选择提交------> AwaitingNarration --> ...
//! AwaitingChoice    --无选项--------> Finished（终态）
//! ```

use std::fmt;

/// 编排器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// 等待拉取叙述（会话开始前、选择提交后）
    AwaitingNarration,
    /// 等待玩家选择
    AwaitingChoice,
    /// 会话结束
    Finished,
}

impl TurnState {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AwaitingNarration => "AwaitingNarration",
            Self::AwaitingChoice => "AwaitingChoice",
            Self::Finished => "Finished",
        };
        f.write_str(name)
    }
}

/// 一次驱动（开始或提交选择）之后的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// 有新的选项等待玩家选择
    Continuing,
    /// 故事结束，只在进入终态的那一次返回
    Finished,
}
