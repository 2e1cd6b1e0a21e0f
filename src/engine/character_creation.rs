use rand::Rng;

use crate::model::player::{AgeCategory, PlayerDetails, StatBand};
use crate::ui::presenter::{ChoiceOption, ChoicePresenter, PresenterError};

const FALLBACK_NAME: &str = "Stranger";

/// Walks the player through persona creation. Nothing is returned until
/// every attribute has an answer.
pub fn create_player<P, R>(presenter: &mut P, rng: &mut R) -> Result<PlayerDetails, PresenterError>
where
    P: ChoicePresenter,
    R: Rng + ?Sized,
{
    let name = presenter.ask_text("What's your name?")?;
    let name = if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    };
    let backstory = presenter.ask_text("What's your backstory?")?;

    let age = presenter.present_choice(
        "What's your age?",
        AgeCategory::ALL
            .iter()
            .map(|age| ChoiceOption::new(age.label(), *age))
            .collect(),
    )?;

    let attack = pick_stat(presenter, rng, "What's your attack damage?")?;
    let defence = pick_stat(presenter, rng, "What's your defence?")?;
    let health = pick_stat(presenter, rng, "What's your health?")?;

    Ok(PlayerDetails::new(name, backstory, age, health, attack, defence))
}

fn pick_stat<P, R>(presenter: &mut P, rng: &mut R, prompt: &str) -> Result<u32, PresenterError>
where
    P: ChoicePresenter,
    R: Rng + ?Sized,
{
    let options = StatBand::ALL
        .iter()
        .map(|band| ChoiceOption::new(band.label(), band.roll(rng)))
        .collect();
    presenter.present_choice(prompt, options)
}
