//! # Turn 模块
//!
//! 回合编排，负责把故事引擎的输出组织成日志历史。
//!
//! ## 模块结构
//!
//! - [`orchestrator`]：回合状态机
//! - [`builder`]：叙述段、选项列表与回显的构造
//! - [`state`]：状态与回合结果

pub mod builder;
pub mod orchestrator;
pub mod state;

pub use builder::Speaker;
pub use orchestrator::TurnOrchestrator;
pub use state::{TurnOutcome, TurnState};
