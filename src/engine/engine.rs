use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info};

use crate::engine::character_creation::create_player;
use crate::engine::error::SessionError;
use crate::engine::protocol::{OpeningScene, SessionReport, TurnConfig, TurnState};
use crate::engine::strategy::OptionStrategy;
use crate::model::game_state::GameState;
use crate::model::narration::Generated;
use crate::ui::presenter::{ChoiceOption, ChoicePresenter, PresenterError};

/// Runs one session: character creation, then generate → present → commit
/// until something fatal happens. The engine is the only writer of
/// [`GameState`].
pub struct TurnEngine<P> {
    strategy: Box<dyn OptionStrategy>,
    presenter: P,
    config: TurnConfig,
    rng: StdRng,
    game: Option<GameState>,
    /// Fixed opening scene, consumed by the first generation step.
    opening: Option<Generated>,
    turn_state: TurnState,
    turns_committed: u32,
}

impl<P: ChoicePresenter> TurnEngine<P> {
    pub fn new(
        strategy: Box<dyn OptionStrategy>,
        presenter: P,
        config: TurnConfig,
    ) -> Result<Self, SessionError> {
        validate(strategy.as_ref(), &config)?;

        Ok(Self {
            strategy,
            presenter,
            config,
            rng: StdRng::from_entropy(),
            game: None,
            opening: None,
            turn_state: TurnState::Initializing,
            turns_committed: 0,
        })
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn turn_state(&self) -> &TurnState {
        &self.turn_state
    }

    pub fn turns_committed(&self) -> u32 {
        self.turns_committed
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Advances the state machine by one state.
    pub fn step(&mut self) -> &TurnState {
        let current = std::mem::replace(&mut self.turn_state, TurnState::Initializing);

        let next = match current {
            TurnState::Initializing => self.initialize(),
            TurnState::AwaitingGeneration => self.generate(),
            TurnState::Presenting { generated } => self.present(generated),
            TurnState::Committing {
                narration,
                selection,
            } => self.commit(narration, selection),
            terminated @ TurnState::Terminated(_) => Ok(terminated),
        };

        self.turn_state = next.unwrap_or_else(|e| {
            match e {
                SessionError::PresenterCancelled => {
                    info!(turns = self.turns_committed, "session cancelled by player")
                }
                _ => error!(error = %e, turns = self.turns_committed, "session terminated"),
            }
            TurnState::Terminated(e)
        });
        debug!(state = self.turn_state.name(), "turn state");
        &self.turn_state
    }

    /// Steps until the session terminates.
    pub fn run(mut self) -> SessionReport {
        info!(strategy = self.strategy.name(), "session starting");

        while !self.step().is_terminated() {}

        let error = match self.turn_state {
            TurnState::Terminated(error) => error,
            _ => unreachable!("loop only exits on termination"),
        };

        SessionReport {
            turns_committed: self.turns_committed,
            state: self.game,
            error,
        }
    }

    fn initialize(&mut self) -> Result<TurnState, SessionError> {
        let player = create_player(&mut self.presenter, &mut self.rng).map_err(presenter_error)?;
        info!(name = player.name(), age = %player.age(), "player created");

        self.opening = match &self.config.opening {
            OpeningScene::Fixed { narration, options } => Some(Generated {
                narration: narration.clone(),
                options: options.clone(),
            }),
            OpeningScene::Generated => None,
        };
        self.game = Some(GameState::new(player));

        Ok(TurnState::AwaitingGeneration)
    }

    fn generate(&mut self) -> Result<TurnState, SessionError> {
        let Some(game) = self.game.as_mut() else {
            return Ok(TurnState::Initializing);
        };

        let generated = match self.opening.take() {
            Some(opening) => opening,
            None => self
                .strategy
                .generate(&game.events, self.config.requested_options)?,
        };
        info!(
            turn = self.turns_committed + 1,
            options = generated.options.len(),
            "options generated"
        );

        game.events.set_current_narration(generated.narration.clone());
        Ok(TurnState::Presenting { generated })
    }

    fn present(&mut self, generated: Generated) -> Result<TurnState, SessionError> {
        let options = generated
            .options
            .iter()
            .map(|option| ChoiceOption::new(option.clone(), option.clone()))
            .collect();

        let selection = self
            .presenter
            .present_choice(&generated.narration, options)
            .map_err(presenter_error)?;

        Ok(TurnState::Committing {
            narration: generated.narration,
            selection,
        })
    }

    fn commit(&mut self, narration: String, selection: String) -> Result<TurnState, SessionError> {
        let Some(game) = self.game.as_mut() else {
            return Ok(TurnState::Initializing);
        };

        game.events.commit_turn(narration, selection);
        self.turns_committed += 1;
        info!(
            turn = self.turns_committed,
            history = game.events.history().len(),
            choice = %game.events.pending_user_step().description,
            "turn committed"
        );

        self.presenter.announce(game);
        Ok(TurnState::AwaitingGeneration)
    }
}

fn presenter_error(error: PresenterError) -> SessionError {
    match error {
        PresenterError::Cancelled => SessionError::PresenterCancelled,
        PresenterError::Io(e) => SessionError::Presenter(e),
    }
}

fn validate(strategy: &dyn OptionStrategy, config: &TurnConfig) -> Result<(), SessionError> {
    let bounds = strategy.bounds();

    if !bounds.contains(config.requested_options) {
        return Err(SessionError::InvalidConfig(format!(
            "{} strategy supports {}..={} options, {} requested",
            strategy.name(),
            bounds.min,
            bounds.max,
            config.requested_options
        )));
    }

    if let OpeningScene::Fixed { options, .. } = &config.opening {
        if !bounds.contains(options.len()) {
            return Err(SessionError::InvalidConfig(format!(
                "opening scene has {} options, {} strategy supports {}..={}",
                options.len(),
                strategy.name(),
                bounds.min,
                bounds.max
            )));
        }
    }

    Ok(())
}
