//! Pipeline stages and run states.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three ordered pipeline steps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Stage {
    /// Gather findings on the topic.
    Research,
    /// Turn the findings into a draft article.
    Writing,
    /// Polish the draft into the final article.
    Editing,
}

impl Stage {
    /// Execution order. Each stage takes the previous stage's text as context.
    pub const ORDER: [Stage; 3] = [Stage::Research, Stage::Writing, Stage::Editing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Research => "research",
            Stage::Writing => "writing",
            Stage::Editing => "editing",
        }
    }

    /// 1-based position in [`Stage::ORDER`].
    pub fn step_number(&self) -> usize {
        match self {
            Stage::Research => 1,
            Stage::Writing => 2,
            Stage::Editing => 3,
        }
    }

    /// The stage whose output feeds this one, if any.
    pub fn upstream(&self) -> Option<Stage> {
        match self {
            Stage::Research => None,
            Stage::Writing => Some(Stage::Research),
            Stage::Editing => Some(Stage::Writing),
        }
    }

    /// Section heading used in the persisted artifact.
    pub fn section_title(&self) -> &'static str {
        match self {
            Stage::Research => "RESEARCH FINDINGS:",
            Stage::Writing => "DRAFT ARTICLE:",
            Stage::Editing => "FINAL ARTICLE:",
        }
    }

    /// Progress phrase shown while the stage runs.
    pub fn activity(&self) -> &'static str {
        match self {
            Stage::Research => "is gathering information",
            Stage::Writing => "is creating the article",
            Stage::Editing => "is reviewing and polishing",
        }
    }

    /// Progress line shown when the stage returns.
    pub fn completion_message(&self) -> &'static str {
        match self {
            Stage::Research => "Research completed!",
            Stage::Writing => "Article written!",
            Stage::Editing => "Editing completed!",
        }
    }

    /// Label for the console preview of this stage's result.
    ///
    /// The editing result is printed in full instead of previewed.
    pub fn preview_label(&self) -> Option<&'static str> {
        match self {
            Stage::Research => Some("Research Summary"),
            Stage::Writing => Some("Article Preview"),
            Stage::Editing => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a pipeline run currently is.
///
/// `Start → Research → Writing → Editing → Persisted → Done`, with `Failed`
/// absorbing from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Start,
    Running(Stage),
    Persisted,
    Done,
    Failed,
}

impl PipelineState {
    /// The state that follows a successful step from this one.
    ///
    /// `Done` and `Failed` are terminal and map to themselves.
    pub fn next(self) -> Self {
        match self {
            PipelineState::Start => PipelineState::Running(Stage::Research),
            PipelineState::Running(Stage::Research) => PipelineState::Running(Stage::Writing),
            PipelineState::Running(Stage::Writing) => PipelineState::Running(Stage::Editing),
            PipelineState::Running(Stage::Editing) => PipelineState::Persisted,
            PipelineState::Persisted => PipelineState::Done,
            PipelineState::Done => PipelineState::Done,
            PipelineState::Failed => PipelineState::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_matches_upstream_links() {
        assert_eq!(Stage::ORDER[0].upstream(), None);
        for pair in Stage::ORDER.windows(2) {
            assert_eq!(pair[1].upstream(), Some(pair[0]));
        }
    }

    #[test]
    fn test_step_numbers_follow_order() {
        for (i, stage) in Stage::ORDER.iter().enumerate() {
            assert_eq!(stage.step_number(), i + 1);
        }
    }

    #[test]
    fn test_value_enum_names_match_as_str() {
        for stage in Stage::ORDER {
            assert_eq!(Stage::from_str(stage.as_str(), false), Ok(stage));
            let value = stage.to_possible_value().unwrap();
            assert_eq!(value.get_name(), stage.as_str());
        }
        assert!(Stage::from_str("publishing", false).is_err());
    }

    #[test]
    fn test_state_walk_reaches_done() {
        let mut state = PipelineState::Start;
        let mut visited = vec![state];
        while state != PipelineState::Done {
            state = state.next();
            visited.push(state);
        }

        assert_eq!(
            visited,
            vec![
                PipelineState::Start,
                PipelineState::Running(Stage::Research),
                PipelineState::Running(Stage::Writing),
                PipelineState::Running(Stage::Editing),
                PipelineState::Persisted,
                PipelineState::Done,
            ]
        );
    }

    #[test]
    fn test_failed_is_absorbing() {
        assert_eq!(PipelineState::Failed.next(), PipelineState::Failed);
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let json = serde_json::to_string(&Stage::Writing).unwrap();
        assert_eq!(json, "\"writing\"");
    }
}
