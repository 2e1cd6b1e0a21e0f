use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use taleweaver::config::credential::{credential, credential_for};
use taleweaver::config::settings::{Backend, GameSettings};
use taleweaver::config::settings_io::{load_settings, save_settings, settings_path};
use taleweaver::engine::gateway::NarrationGateway;
use taleweaver::engine::llm_client::OpenAiChatClient;
use taleweaver::engine::service_backed::ServiceBackedGenerator;
use taleweaver::engine::synthetic::SyntheticGenerator;
use taleweaver::ui::console::{ConsolePresenter, ConsoleSpinner};
use taleweaver::{OptionStrategy, SessionError, SessionReport, TurnEngine};

#[derive(Debug, Parser)]
#[command(name = "taleweaver", about = "Choose-your-path stories narrated by an LLM.")]
struct Cli {
    /// Settings file (JSON). Defaults to the user config directory.
    #[arg(long, env = "TALEWEAVER_SETTINGS")]
    settings: Option<PathBuf>,

    #[arg(long, value_enum, env = "TALEWEAVER_BACKEND")]
    backend: Option<Backend>,

    /// Options to request per turn.
    #[arg(long)]
    options: Option<usize>,

    #[arg(long, env = "TALEWEAVER_MODEL")]
    model: Option<String>,

    #[arg(long, env = "TALEWEAVER_BASE_URL")]
    base_url: Option<String>,

    /// Save the effective settings and exit.
    #[arg(long)]
    write_settings: bool,

    /// Ping the narration service and exit.
    #[arg(long)]
    check_connection: bool,
}

fn main() -> ExitCode {
    load_dotenv();
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("taleweaver: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let path = cli.settings.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings(&path)?;
    apply_overrides(&mut settings, &cli);
    settings.validate()?;

    if cli.write_settings {
        save_settings(&path, &settings)?;
        println!("Settings written to {}", path.display());
        return Ok(());
    }

    if cli.check_connection {
        let client = service_client(&settings, credential(env_var)?)?;
        println!("{}", client.check_connection().context("checking connection")?);
        return Ok(());
    }

    let api_key = credential_for(settings.backend, env_var)?;
    let strategy = build_strategy(&settings, api_key)?;
    let engine = TurnEngine::new(strategy, ConsolePresenter::stdio(), settings.turn_config())?;
    let report = engine.run();

    eprintln!("\n{}", session_summary(&report));
    match report.error {
        SessionError::PresenterCancelled => Ok(()),
        error => Err(error.into()),
    }
}

/// Closing line for the session. Errors other than cancellation are left
/// out because `main` prints them on the way out.
fn session_summary(report: &SessionReport) -> String {
    match report.error {
        SessionError::PresenterCancelled => format!(
            "Session ended after {} turn(s): {}",
            report.turns_committed, report.error
        ),
        _ => format!("Session ended after {} turn(s).", report.turns_committed),
    }
}

fn apply_overrides(settings: &mut GameSettings, cli: &Cli) {
    if let Some(backend) = cli.backend {
        settings.backend = backend;
    }
    if let Some(options) = cli.options {
        settings.requested_options = options;
    }
    if let Some(model) = &cli.model {
        settings.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        settings.base_url = base_url.clone();
    }
}

fn build_strategy(
    settings: &GameSettings,
    api_key: Option<String>,
) -> Result<Box<dyn OptionStrategy>> {
    let strategy: Box<dyn OptionStrategy> = match (settings.backend, api_key) {
        (Backend::Service, Some(api_key)) => {
            let client = service_client(settings, api_key)?;
            tracing::info!(model = client.model(), "using narration service");
            let gateway = NarrationGateway::new(client, settings.option_bounds());
            Box::new(ServiceBackedGenerator::new(gateway, settings.retry()))
        }
        (Backend::Service, None) => bail!("service backend started without a credential"),
        (Backend::Synthetic, _) => Box::new(
            SyntheticGenerator::new(settings.synthetic_delay())
                .deadline(settings.synthetic_deadline())
                .indicator(Arc::new(ConsoleSpinner)),
        ),
    };
    Ok(strategy)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn service_client(settings: &GameSettings, api_key: String) -> Result<OpenAiChatClient> {
    let client = OpenAiChatClient::new(
        &settings.base_url,
        api_key,
        settings.model.clone(),
        settings.temperature,
        settings.request_timeout(),
    )
    .context("building narration client")?;
    Ok(client)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taleweaver=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Prefers `.env.local` over `.env`; a missing file is not an error.
fn load_dotenv() {
    for filename in [".env.local", ".env"] {
        let _ = dotenvy::from_filename(filename);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taleweaver::GenerationError;

    fn report(error: SessionError) -> SessionReport {
        SessionReport {
            turns_committed: 3,
            state: None,
            error,
        }
    }

    #[test]
    fn cancellation_summary_names_the_reason() {
        let summary = session_summary(&report(SessionError::PresenterCancelled));
        assert_eq!(
            summary,
            "Session ended after 3 turn(s): player cancelled the selection"
        );
    }

    #[test]
    fn fatal_error_is_left_to_the_exit_diagnostic() {
        let error = GenerationError::WorkerFailed {
            index: 1,
            reason: "out of ideas".into(),
        };
        let summary = session_summary(&report(error.into()));

        assert_eq!(summary, "Session ended after 3 turn(s).");
        assert!(!summary.contains("out of ideas"));
    }

    #[test]
    fn cli_overrides_replace_file_settings() {
        let cli = Cli::parse_from(["taleweaver", "--backend", "synthetic", "--options", "6"]);
        let mut settings = GameSettings::default();
        apply_overrides(&mut settings, &cli);

        assert_eq!(settings.backend, Backend::Synthetic);
        assert_eq!(settings.requested_options, 6);
        assert_eq!(settings.model, GameSettings::default().model);
    }
}
