#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use taleweaver::engine::error::TransportError;
use taleweaver::engine::llm_client::NarrationService;
use taleweaver::model::game_state::GameState;
use taleweaver::ui::presenter::{ChoiceOption, ChoicePresenter, PresenterError};

/// Every menu the presenter was shown, as (prompt, labels).
pub type Shown = Rc<RefCell<Vec<(String, Vec<String>)>>>;

/// Presenter that answers from scripts and records what it was shown.
/// Menus are answered by label; running out of picks cancels.
pub struct ScriptedPresenter {
    texts: VecDeque<String>,
    picks: VecDeque<String>,
    pub shown: Shown,
    pub announced: Rc<RefCell<Vec<GameState>>>,
}

impl ScriptedPresenter {
    /// Creates Ava (Young, all Normal stats) and then picks `picks` in order.
    pub fn ava(picks: &[&str]) -> Self {
        let mut all = vec!["Young", "Normal", "Normal", "Normal"];
        all.extend_from_slice(picks);
        Self {
            texts: VecDeque::from(["Ava".to_string(), "A ranger who lost her way".to_string()]),
            picks: all.into_iter().map(str::to_string).collect(),
            shown: Rc::default(),
            announced: Rc::default(),
        }
    }
}

impl ChoicePresenter for ScriptedPresenter {
    fn present_choice<T: Clone>(
        &mut self,
        prompt: &str,
        options: Vec<ChoiceOption<T>>,
    ) -> Result<T, PresenterError> {
        self.shown.borrow_mut().push((
            prompt.to_string(),
            options.iter().map(|option| option.label.clone()).collect(),
        ));

        let label = self.picks.pop_front().ok_or(PresenterError::Cancelled)?;
        options
            .into_iter()
            .find(|option| option.label == label)
            .map(|option| option.value)
            .ok_or(PresenterError::Cancelled)
    }

    fn ask_text(&mut self, _prompt: &str) -> Result<String, PresenterError> {
        self.texts.pop_front().ok_or(PresenterError::Cancelled)
    }

    fn announce(&mut self, state: &GameState) {
        self.announced.borrow_mut().push(state.clone());
    }
}

/// Service that replays canned replies and records every prompt.
#[derive(Clone, Default)]
pub struct ScriptedService {
    replies: Rc<RefCell<VecDeque<Result<String, String>>>>,
    pub prompts: Rc<RefCell<Vec<String>>>,
}

impl ScriptedService {
    pub fn new(replies: Vec<Result<&str, &str>>) -> Self {
        Self {
            replies: Rc::new(RefCell::new(
                replies
                    .into_iter()
                    .map(|reply| reply.map(str::to_string).map_err(str::to_string))
                    .collect(),
            )),
            prompts: Rc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl NarrationService for ScriptedService {
    fn complete(&self, prompt: &str) -> Result<String, TransportError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match self.replies.borrow_mut().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(reason)) => Err(TransportError::Other(reason)),
            None => Err(TransportError::Other("script exhausted".into())),
        }
    }
}
