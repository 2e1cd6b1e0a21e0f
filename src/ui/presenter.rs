use thiserror::Error;

use crate::model::game_state::GameState;

/// One entry in a choice menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption<T> {
    pub label: String,
    pub value: T,
}

impl<T> ChoiceOption<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Error)]
pub enum PresenterError {
    #[error("selection cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Whatever shows menus to the player and blocks until they answer.
pub trait ChoicePresenter {
    fn present_choice<T: Clone>(
        &mut self,
        prompt: &str,
        options: Vec<ChoiceOption<T>>,
    ) -> Result<T, PresenterError>;

    fn ask_text(&mut self, prompt: &str) -> Result<String, PresenterError>;

    /// Advisory dump after each commit.
    fn announce(&mut self, _state: &GameState) {}
}
