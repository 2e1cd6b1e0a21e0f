mod common;

use common::{ScriptedPresenter, ScriptedService};
use taleweaver::engine::gateway::NarrationGateway;
use taleweaver::engine::service_backed::{RetryConfig, ServiceBackedGenerator};
use taleweaver::model::event::{Event, Role};
use taleweaver::model::narration::OptionBounds;
use taleweaver::{
    GatewayError, GenerationError, OpeningScene, SessionError, TurnConfig, TurnEngine,
};

fn forest_opening() -> TurnConfig {
    TurnConfig {
        requested_options: 4,
        opening: OpeningScene::Fixed {
            narration: "You wake in a forest.".into(),
            options: vec![
                "Explore north".into(),
                "Search the clearing".into(),
                "Call out for help".into(),
            ],
        },
    }
}

fn service_strategy(service: ScriptedService) -> Box<ServiceBackedGenerator<ScriptedService>> {
    Box::new(ServiceBackedGenerator::new(
        NarrationGateway::new(service, OptionBounds::new(2, 4)),
        RetryConfig::default(),
    ))
}

#[test]
fn forest_scenario_commits_first_turn_and_presents_next() {
    let service = ScriptedService::new(vec![Ok(
        r#"{"narration":"A path splits.","options":["Left","Right"]}"#,
    )]);
    let presenter = ScriptedPresenter::ava(&["Explore north"]);
    let shown = presenter.shown.clone();

    let engine = TurnEngine::new(service_strategy(service.clone()), presenter, forest_opening())
        .unwrap();
    let report = engine.run();

    assert!(matches!(report.error, SessionError::PresenterCancelled));
    assert_eq!(report.turns_committed, 1);

    let state = report.state.unwrap();
    assert_eq!(state.player.name(), "Ava");
    assert_eq!(
        state.events.history(),
        &[
            Event::narrator("You wake in a forest."),
            Event::user("Explore north"),
        ]
    );
    assert_eq!(state.events.current_narration().description, "A path splits.");

    let shown = shown.borrow();
    let (prompt, labels) = shown.last().unwrap();
    assert_eq!(prompt, "A path splits.");
    assert_eq!(labels, &vec!["Left".to_string(), "Right".to_string()]);

    assert_eq!(service.calls(), 1);
    let sent = &service.prompts.borrow()[0];
    assert!(sent.contains("Narrator: You wake in a forest.\nUser: Explore north\n"));
    assert!(sent.contains("LAST USER ACTION: Explore north"));
}

#[test]
fn history_alternates_over_several_turns() {
    let service = ScriptedService::new(vec![
        Ok(r#"{"narration":"A path splits.","options":["Left","Right"]}"#),
        Ok(r#"{"narration":"A river.","options":["Swim","Wade","Turn back"]}"#),
        Ok(r#"{"narration":"Cold water.","options":["Shiver","Dry off"]}"#),
    ]);
    let presenter = ScriptedPresenter::ava(&["Explore north", "Left", "Swim", "Dry off"]);
    let announced = presenter.announced.clone();

    let report = TurnEngine::new(service_strategy(service.clone()), presenter, forest_opening())
        .unwrap()
        .run();

    assert_eq!(report.turns_committed, 4);
    let state = report.state.unwrap();
    let history = state.events.history();
    assert_eq!(history.len(), 8);

    let roles: Vec<Role> = history.iter().map(|event| event.role).collect();
    assert_eq!(
        roles,
        [Role::Narrator, Role::User].repeat(4),
        "history must alternate narrator and user"
    );
    let picks: Vec<&str> = history
        .iter()
        .filter(|event| event.role == Role::User)
        .map(|event| event.description.as_str())
        .collect();
    assert_eq!(picks, ["Explore north", "Left", "Swim", "Dry off"]);

    let announced = announced.borrow();
    assert_eq!(announced.len(), 4);
    assert_eq!(announced[1].events.history().len(), 4);
}

#[test]
fn invalid_replies_are_retried_until_one_validates() {
    let service = ScriptedService::new(vec![
        Ok("Here you go!"),
        Ok(r#"{"narration":"Too many","options":["a","b","c","d","e"]}"#),
        Ok(r#"{"narration":"A path splits.","options":["Left","Right"]}"#),
    ]);
    let presenter = ScriptedPresenter::ava(&["Explore north"]);

    let report = TurnEngine::new(service_strategy(service.clone()), presenter, forest_opening())
        .unwrap()
        .run();

    assert_eq!(service.calls(), 3);
    assert!(matches!(report.error, SessionError::PresenterCancelled));
    assert_eq!(
        report.state.unwrap().events.current_narration().description,
        "A path splits."
    );
}

#[test]
fn exhausted_retries_end_the_session_without_half_commits() {
    let service = ScriptedService::new(vec![
        Err("connection refused"),
        Ok("{ nope"),
        Ok(r#"{"narration":"x","options":["only"]}"#),
        Ok("no braces"),
        Ok(r#"{"narration":"x","options":[]}"#),
        Ok(r#"{"narration":"never read","options":["a","b"]}"#),
    ]);
    let presenter = ScriptedPresenter::ava(&["Explore north", "a"]);

    let report = TurnEngine::new(service_strategy(service.clone()), presenter, forest_opening())
        .unwrap()
        .run();

    assert_eq!(service.calls(), 5);
    assert_eq!(report.turns_committed, 1);
    assert_eq!(report.state.unwrap().events.history().len(), 2);

    match report.error {
        SessionError::Generation(GenerationError::Exhausted { attempts, last }) => {
            assert_eq!(attempts, 5);
            assert!(matches!(
                last,
                GatewayError::OptionCountOutOfRange { count: 0, .. }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn generated_opening_asks_the_service_first() {
    let service = ScriptedService::new(vec![Ok(
        r#"{"narration":"You wake in a forest.","options":["Explore north","Sleep"]}"#,
    )]);
    let presenter = ScriptedPresenter::ava(&[]);
    let shown = presenter.shown.clone();
    let config = TurnConfig {
        requested_options: 2,
        opening: OpeningScene::Generated,
    };

    let report = TurnEngine::new(service_strategy(service.clone()), presenter, config)
        .unwrap()
        .run();

    assert_eq!(service.calls(), 1);
    assert!(service.prompts.borrow()[0].contains("STORY HISTORY:\n\n"));
    assert_eq!(report.turns_committed, 0);
    assert!(report.state.unwrap().events.history().is_empty());
    assert_eq!(shown.borrow().last().unwrap().0, "You wake in a forest.");
}
