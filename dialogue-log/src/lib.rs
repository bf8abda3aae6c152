//! # Dialogue Log
//!
//! 互动小说对话日志的核心库。
//!
//! ## 架构概述
//!
//! `dialogue-log` 是纯逻辑核心，不依赖任何 IO 或文本控件。
//! 它从故事引擎拉取叙述与选项，组织成按回合分段的日志，
//! 并渲染为带颜色的标记文本交给宿主（Host）显示：
//!
//! ```text
//! StoryEngine ──► TurnOrchestrator ──► LogSection ──► LogManager ──► String ──► Host
//!                        ▲                                                        │
//!                        └──────────────── select_choice(index) ◄─────────────────┘
//! ```
//!
//! 只有最后一段是活跃的，更早的段在渲染时统一变暗；
//! 已经选过的分支在选项列表中再次出现时也会变暗。
//!
//! ## 核心类型
//!
//! - [`TurnOrchestrator`]：回合状态机
//! - [`LogManager`]：日志历史
//! - [`LogSection`]：一个回合的条目
//! - [`LogEntry`]：单条记录
//! - [`StoryEngine`]：故事引擎接口
//! - [`LogStyle`]：颜色与标签配置
//!
//! ## 使用示例
//!
//! ```ignore
//! use dialogue_log::{LogStyle, ScriptedStory, StoryScript, TurnOrchestrator, TurnOutcome};
//!
//! let story = ScriptedStory::new(StoryScript::from_json(text)?)?;
//! let mut session = TurnOrchestrator::new(story, LogStyle::default())?;
//!
//! let mut outcome = session.start()?;
//! loop {
//!     widget.set_markup(&session.render());
//!     if outcome == TurnOutcome::Finished {
//!         break;
//!     }
//!     outcome = session.select_choice(widget.clicked_index())?;
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`color`]：颜色与变暗
//! - [`markup`]：标记片段
//! - [`entry`] / [`section`] / [`manager`]：日志数据模型
//! - [`visited`]：已访问分支
//! - [`style`]：样式配置
//! - [`story`]：故事引擎接口与内存实现
//! - [`turn`]：回合编排
//! - [`error`]：错误类型定义

pub mod color;
pub mod entry;
pub mod error;
pub mod manager;
pub mod markup;
pub mod section;
pub mod story;
pub mod style;
pub mod turn;
pub mod visited;

// 重导出核心类型
pub use color::{Color, ColorParseError};
pub use entry::{LogEntry, StandardEntry};
pub use error::{LogError, LogResult, StoryError, StyleError};
pub use manager::LogManager;
pub use section::LogSection;
pub use story::{
    Knot, ScriptChoice, ScriptIssue, ScriptLine, ScriptedStory, StoryChoice, StoryEngine,
    StoryScript, VarValue,
};
pub use style::LogStyle;
pub use turn::{Speaker, TurnOrchestrator, TurnOutcome, TurnState};
pub use visited::VisitedChoices;
