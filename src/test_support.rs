use crate::model::{ModelError, TextGenerator};
use std::cell::RefCell;
use std::collections::VecDeque;

/// One recorded `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GenerateCall {
    pub model: String,
    pub prompt: String,
}

/// A `TextGenerator` that replays queued results and records every call.
pub(crate) struct ScriptedGenerator {
    responses: RefCell<VecDeque<Result<String, ModelError>>>,
    calls: RefCell<Vec<GenerateCall>>,
}

impl ScriptedGenerator {
    pub(crate) fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_results(responses.into_iter().map(|s| Ok(s.into())).collect())
    }

    pub(crate) fn from_results(responses: Vec<Result<String, ModelError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<GenerateCall> {
        self.calls.borrow().clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, ModelError> {
        self.calls.borrow_mut().push(GenerateCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected generate call #{}", self.calls.borrow().len()))
    }
}
