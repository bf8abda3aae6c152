//! # Orchestrator 模块
//!
//! 回合编排器：驱动故事引擎并维护日志历史。
//!
//! ## 执行模型
//!
//! ```text
//! start()            -> 叙述阶段 -> 选项阶段 -> TurnOutcome
//! select_choice(i)   -> 记录访问 -> 替换选项段为回显 -> 叙述阶段 -> 选项阶段 -> TurnOutcome
//! ```
//!
//! 每次调用都同步执行到底，调用返回后 Host 通过 [`TurnOrchestrator::render`]
//! 取得完整标记文本。

use tracing::{debug, error, info, warn};

use crate::entry::LogEntry;
use crate::error::{LogError, LogResult};
use crate::manager::LogManager;
use crate::section::LogSection;
use crate::story::{StoryChoice, StoryEngine};
use crate::style::LogStyle;
use crate::turn::builder::{NarrationBuilder, choice_list_markup, echo_section};
use crate::turn::state::{TurnOutcome, TurnState};
use crate::visited::VisitedChoices;

type FinishedHook = Box<dyn FnOnce()>;

/// 回合编排器
///
/// 独占日志历史与访问记录，整个对话会话内只有这一个实例修改它们。
///
/// # 使用示例
///
/// ```ignore
/// let mut session = TurnOrchestrator::new(story, LogStyle::default())?;
///
/// let mut outcome = session.start()?;
/// widget.set_markup(&session.render());
///
/// while outcome == TurnOutcome::Continuing {
///     let index = widget.wait_for_click();
///     outcome = session.select_choice(index)?;
///     widget.set_markup(&session.render());
/// }
/// ```
pub struct TurnOrchestrator<S: StoryEngine> {
    /// 故事引擎
    story: S,
    /// 渲染样式
    style: LogStyle,
    /// 日志历史
    log: LogManager,
    /// 已访问的选项路径
    visited: VisitedChoices,
    /// 当前状态
    state: TurnState,
    /// 当前展示的选项
    pending: Vec<StoryChoice>,
    /// 角色名（来自故事变量）
    character_name: String,
    /// 已完成的叙述阶段数
    turns: usize,
    /// 故事结束时调用一次
    on_finished: Option<FinishedHook>,
}

impl<S: StoryEngine> TurnOrchestrator<S> {
    /// 创建编排器
    ///
    /// 样式无效时返回 [`LogError::Style`]。
    /// 角色名从故事变量 `style.character_name_variable` 读取，缺失时角色行不显示标签。
    pub fn new(story: S, style: LogStyle) -> LogResult<Self> {
        style.validate()?;

        let character_name = match story.fetch_string(&style.character_name_variable) {
            Some(name) => name,
            None => {
                warn!(
                    variable = %style.character_name_variable,
                    "故事变量中没有角色名，角色台词将不显示标签"
                );
                String::new()
            }
        };

        Ok(Self {
            log: LogManager::new(style.inactive_darkening),
            story,
            style,
            visited: VisitedChoices::new(),
            state: TurnState::AwaitingNarration,
            pending: Vec::new(),
            character_name,
            turns: 0,
            on_finished: None,
        })
    }

    /// 注册故事结束回调
    ///
    /// 回调最多被调用一次。
    pub fn on_finished(mut self, hook: impl FnOnce() + 'static) -> Self {
        self.on_finished = Some(Box::new(hook));
        self
    }

    /// 开始会话：执行第一个叙述阶段与选项阶段
    ///
    /// 只有尚未开始的会话处于 `AwaitingNarration`，其余状态一律拒绝。
    pub fn start(&mut self) -> LogResult<TurnOutcome> {
        if self.state != TurnState::AwaitingNarration {
            return Err(LogError::StateMismatch {
                expected: TurnState::AwaitingNarration.to_string(),
                actual: self.state.to_string(),
            });
        }

        info!(character = %self.character_name, "对话会话开始");
        self.run_turn()
    }

    /// 提交玩家选择
    ///
    /// 索引越界时返回 [`LogError::InvalidChoice`]，不修改任何状态。
    pub fn select_choice(&mut self, index: usize) -> LogResult<TurnOutcome> {
        match self.state {
            TurnState::Finished => return Err(LogError::SessionFinished),
            TurnState::AwaitingChoice if self.log.has_pending_choices() => {}
            state => {
                return Err(LogError::StateMismatch {
                    expected: TurnState::AwaitingChoice.to_string(),
                    actual: state.to_string(),
                });
            }
        }

        let choice = self
            .pending
            .get(index)
            .cloned()
            .ok_or(LogError::InvalidChoice {
                index,
                max: self.pending.len(),
            })?;

        self.story.choose_index(choice.index)?;

        debug!(index, path = %choice.path_id, "提交选择");
        self.visited.insert(choice.path_id);
        self.log
            .replace_last_section(echo_section(&choice.text, &self.style))?;
        self.pending.clear();

        self.run_turn()
    }

    /// 渲染完整日志
    pub fn render(&self) -> String {
        self.log.render()
    }

    fn run_turn(&mut self) -> LogResult<TurnOutcome> {
        self.state = TurnState::AwaitingNarration;

        let section = match self.pull_narration() {
            Ok(section) => section,
            Err(e) => {
                // 叙述阶段的失败不可恢复，会话直接进入终态
                error!(error = %e, turn = self.turns, "叙述阶段失败，会话终止");
                self.state = TurnState::Finished;
                return Err(e);
            }
        };

        self.turns += 1;
        debug!(turn = self.turns, entries = section.len(), "叙述阶段完成");
        self.log.append_section(section);
        self.state = TurnState::AwaitingChoice;

        Ok(self.present_choices())
    }

    fn pull_narration(&mut self) -> LogResult<LogSection> {
        let limit = self.style.max_lines_per_turn;
        let mut builder = NarrationBuilder::new(&self.style, &self.character_name);
        let mut pulled = 0;

        while self.story.can_continue() {
            if pulled >= limit {
                return Err(LogError::NarrationOverrun { limit });
            }
            let text = self.story.continue_once()?;
            pulled += 1;

            let tags = self.story.current_tags();
            builder.push_line(&text, &tags);
        }

        Ok(builder.finish())
    }

    fn present_choices(&mut self) -> TurnOutcome {
        let choices = self.story.current_choices();

        if choices.is_empty() {
            self.state = TurnState::Finished;
            info!(turns = self.turns, visited = self.visited.len(), "故事结束");
            if let Some(hook) = self.on_finished.take() {
                hook();
            }
            return TurnOutcome::Finished;
        }

        let markup = choice_list_markup(&choices, &self.visited, &self.style);
        self.log
            .append_section(LogSection::with_entry(LogEntry::choice_list(markup)));
        debug!(count = choices.len(), "展示选项");
        self.pending = choices;

        TurnOutcome::Continuing
    }

    /// 当前状态
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// 日志历史
    pub fn log(&self) -> &LogManager {
        &self.log
    }

    /// 已访问的选项路径
    pub fn visited(&self) -> &VisitedChoices {
        &self.visited
    }

    /// 当前展示的选项
    pub fn pending_choices(&self) -> &[StoryChoice] {
        &self.pending
    }

    pub fn story(&self) -> &S {
        &self.story
    }

    pub fn style(&self) -> &LogStyle {
        &self.style
    }

    /// 已完成的叙述阶段数
    pub fn turn_count(&self) -> usize {
        self.turns
    }

    /// 拆出故事引擎
    pub fn into_story(self) -> S {
        self.story
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::color::Color;
    use crate::error::{StoryError, StyleError};
    use crate::story::{ScriptedStory, StoryScript, VarValue};

    const SCRIPT: &str = r#"{
        "start": "hall",
        "variables": { "name": "Mira" },
        "knots": {
            "hall": {
                "lines": [
                    { "text": "Hello", "tags": ["Player"] },
                    { "text": "", "tags": [] }
                ],
                "choices": [
                    { "text": "Ask", "target": "ask" },
                    { "text": "Leave", "target": "END" }
                ]
            },
            "ask": {
                "lines": [
                    { "text": "Who are you?", "tags": ["Player"] },
                    { "text": "A friend.", "tags": ["Character"] },
                    { "text": "Truly.", "tags": ["Character"] }
                ],
                "choices": [
                    { "text": "Back", "target": "hall" }
                ]
            }
        }
    }"#;

    fn session() -> TurnOrchestrator<ScriptedStory> {
        let script = StoryScript::from_json(SCRIPT).unwrap();
        TurnOrchestrator::new(ScriptedStory::new(script).unwrap(), LogStyle::default())
            .unwrap()
    }

    /// 永远可以继续的故事源
    struct Endless;

    impl StoryEngine for Endless {
        fn can_continue(&self) -> bool {
            true
        }

        fn continue_once(&mut self) -> Result<String, StoryError> {
            Ok("again".to_string())
        }

        fn current_tags(&self) -> Vec<String> {
            Vec::new()
        }

        fn current_choices(&self) -> Vec<StoryChoice> {
            Vec::new()
        }

        fn choose_index(&mut self, _index: usize) -> Result<(), StoryError> {
            Err(StoryError::NoChoicesPending)
        }

        fn fetch_variable(&self, _name: &str) -> Option<VarValue> {
            None
        }
    }

    /// 展示一个选项，但拒绝任何选择的故事源
    struct Refusing;

    impl StoryEngine for Refusing {
        fn can_continue(&self) -> bool {
            false
        }

        fn continue_once(&mut self) -> Result<String, StoryError> {
            Err(StoryError::Exhausted)
        }

        fn current_tags(&self) -> Vec<String> {
            Vec::new()
        }

        fn current_choices(&self) -> Vec<StoryChoice> {
            vec![StoryChoice::new(0, "Knock", "door.c-0")]
        }

        fn choose_index(&mut self, _index: usize) -> Result<(), StoryError> {
            Err(StoryError::NoChoicesPending)
        }

        fn fetch_variable(&self, _name: &str) -> Option<VarValue> {
            None
        }
    }

    #[test]
    fn test_start_builds_narration_and_choices() {
        let mut session = session();
        assert_eq!(session.state(), TurnState::AwaitingNarration);

        let outcome = session.start().unwrap();

        assert_eq!(outcome, TurnOutcome::Continuing);
        assert_eq!(session.state(), TurnState::AwaitingChoice);
        assert_eq!(session.log().len(), 2);
        assert_eq!(
            session.log().sections()[0].entries(),
            &[LogEntry::standard("You", "Hello\n", Color::WHITE, Color::WHITE)]
        );
        assert!(session.log().has_pending_choices());
        assert_eq!(session.pending_choices().len(), 2);
        assert_eq!(session.turn_count(), 1);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut session = session();
        session.start().unwrap();
        assert!(matches!(
            session.start(),
            Err(LogError::StateMismatch { .. })
        ));
    }

    #[test]
    fn test_select_before_start_is_rejected() {
        let mut session = session();
        assert_eq!(
            session.select_choice(0),
            Err(LogError::StateMismatch {
                expected: "AwaitingChoice".to_string(),
                actual: "AwaitingNarration".to_string(),
            })
        );
    }

    #[test]
    fn test_select_choice_rewrites_tail() {
        let mut session = session();
        session.start().unwrap();

        let outcome = session.select_choice(0).unwrap();

        assert_eq!(outcome, TurnOutcome::Continuing);
        // 叙述 + 回显 + 叙述 + 选项
        assert_eq!(session.log().len(), 4);
        assert_eq!(
            session.log().sections()[1].entries(),
            &[LogEntry::standard("You", "Ask\n\n", Color::PINK, Color::WHITE)]
        );

        let titles: Vec<&str> = session.log().sections()[2]
            .entries()
            .iter()
            .map(LogEntry::title)
            .collect();
        assert_eq!(titles, vec!["You", "Mira", ""]);

        assert!(session.visited().contains("hall.c-0"));
        assert_eq!(session.turn_count(), 2);
    }

    #[test]
    fn test_only_one_choice_list_and_it_is_last() {
        let mut session = session();
        session.start().unwrap();
        session.select_choice(0).unwrap();
        session.select_choice(0).unwrap();

        let sections = session.log().sections();
        let with_choices: Vec<usize> = sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.has_choice_list())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(with_choices, vec![sections.len() - 1]);
    }

    #[test]
    fn test_invalid_choice_mutates_nothing() {
        let mut session = session();
        session.start().unwrap();
        let before = session.render();
        let log_before = session.log().clone();

        assert_eq!(
            session.select_choice(2),
            Err(LogError::InvalidChoice { index: 2, max: 2 })
        );

        assert_eq!(session.render(), before);
        assert_eq!(session.log(), &log_before);
        assert!(session.visited().is_empty());
        assert_eq!(session.state(), TurnState::AwaitingChoice);
        assert_eq!(session.story().current_knot(), Some("hall"));
    }

    #[test]
    fn test_revisited_choice_is_darkened() {
        let mut session = session();
        session.start().unwrap();
        session.select_choice(0).unwrap(); // hall -> ask
        session.select_choice(0).unwrap(); // ask -> hall

        let style = session.style().clone();
        let last = session.log().last_section().unwrap().entries()[0].body().to_string();
        let dark = style.choice_color.darkened(style.inactive_darkening).to_hex();

        assert!(last.contains(&format!("[color={dark}][url=0]Ask[/url]")));
        assert!(last.contains("[color=#FF0000][url=1]Leave[/url]"));
    }

    #[test]
    fn test_finish_fires_once() {
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);

        let script = StoryScript::from_json(SCRIPT).unwrap();
        let mut session =
            TurnOrchestrator::new(ScriptedStory::new(script).unwrap(), LogStyle::default())
                .unwrap()
                .on_finished(move || counter.set(counter.get() + 1));

        session.start().unwrap();
        let outcome = session.select_choice(1).unwrap();

        assert_eq!(outcome, TurnOutcome::Finished);
        assert_eq!(session.state(), TurnState::Finished);
        assert_eq!(fired.get(), 1);

        // 叙述 + 回显 + 空叙述段，没有选项段
        assert_eq!(session.log().len(), 3);
        assert!(!session.log().has_pending_choices());

        assert_eq!(session.select_choice(0), Err(LogError::SessionFinished));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_visited_grows_monotonically() {
        let mut session = session();
        session.start().unwrap();

        let mut last = session.visited().len();
        for index in [0, 0, 0, 0, 1] {
            session.select_choice(index).unwrap();
            assert!(session.visited().len() >= last);
            last = session.visited().len();
        }
        assert_eq!(last, 3);
    }

    #[test]
    fn test_missing_character_name() {
        let script = StoryScript::from_json(
            r#"{
                "start": "a",
                "knots": { "a": { "lines": [ { "text": "Hm.", "tags": ["Character"] } ] } }
            }"#,
        )
        .unwrap();
        let mut session =
            TurnOrchestrator::new(ScriptedStory::new(script).unwrap(), LogStyle::default())
                .unwrap();

        assert_eq!(session.start().unwrap(), TurnOutcome::Finished);
        let out = session.render();
        assert!(!out.contains("[b]"));
        assert_eq!(out, "[color=#F5DEB3]Hm.\n[/color]");
    }

    #[test]
    fn test_endless_narration_is_fatal() {
        let style = LogStyle {
            max_lines_per_turn: 5,
            ..LogStyle::default()
        };
        let mut session = TurnOrchestrator::new(Endless, style).unwrap();

        assert_eq!(
            session.start(),
            Err(LogError::NarrationOverrun { limit: 5 })
        );
        assert_eq!(session.state(), TurnState::Finished);
        assert!(session.log().is_empty());
        assert_eq!(session.select_choice(0), Err(LogError::SessionFinished));
        assert!(matches!(
            session.start(),
            Err(LogError::StateMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let no_lines = LogStyle {
            max_lines_per_turn: 0,
            ..LogStyle::default()
        };
        assert!(matches!(
            TurnOrchestrator::new(Endless, no_lines),
            Err(LogError::Style(StyleError::InvalidLineLimit))
        ));

        let too_dark = LogStyle {
            inactive_darkening: 2.0,
            ..LogStyle::default()
        };
        assert!(matches!(
            TurnOrchestrator::new(Endless, too_dark),
            Err(LogError::Style(StyleError::InvalidDarkening(d))) if d == 2.0
        ));
    }

    #[test]
    fn test_refused_choice_mutates_nothing() {
        let mut session = TurnOrchestrator::new(Refusing, LogStyle::default()).unwrap();
        assert_eq!(session.start().unwrap(), TurnOutcome::Continuing);
        let before = session.render();
        let log_before = session.log().clone();

        assert_eq!(
            session.select_choice(0),
            Err(LogError::Story(StoryError::NoChoicesPending))
        );

        assert_eq!(session.state(), TurnState::AwaitingChoice);
        assert!(session.visited().is_empty());
        assert_eq!(session.render(), before);
        assert_eq!(session.log(), &log_before);
        assert_eq!(session.pending_choices().len(), 1);
        assert_eq!(session.turn_count(), 1);
    }

    #[test]
    fn test_render_after_each_phase() {
        let mut session = session();
        session.start().unwrap();
        let first = session.render();
        assert_eq!(first, session.render());

        // 选项段追加后，之前的叙述段已变暗
        let dim_white = Color::WHITE.darkened(0.3).to_hex();
        assert!(first.starts_with(&format!("[color={dim_white}][b]YOU[/b] - [/color]")));
        assert!(first.ends_with("[/ol]"));

        session.select_choice(0).unwrap();
        let second = session.render();
        assert!(second.starts_with(&first[..first.find("[ol]").unwrap()]));
        assert_ne!(first, second);
    }
}
