use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use weather_core::{Config, Orchestrator, SearchState, Session};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Log requests and classified failures to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and description language.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Copenhagen".
        city: String,

        /// Print the summary as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Search repeatedly from a prompt until Esc or Ctrl-C.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => show(&city, json).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("API key prompt aborted")?;
    cfg.set_api_key(api_key);

    let lang = Text::new("Description language:")
        .with_default(&cfg.lang)
        .prompt()
        .context("Language prompt aborted")?;
    cfg.lang = lang.trim().to_string();

    let path = cfg.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn show(city: &str, json: bool) -> anyhow::Result<()> {
    let cfg = Config::from_env()?;
    let orchestrator = Orchestrator::from_config(&cfg)?;

    match orchestrator.search(city).await {
        Ok(summary) if json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Ok(summary) => {
            println!("{}", render::summary(&summary));
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "search failed");
            Err(anyhow!(err.kind().user_message()))
        }
    }
}

async fn interactive() -> anyhow::Result<()> {
    let cfg = Config::from_env()?;
    let mut session = Session::new(Orchestrator::from_config(&cfg)?);

    loop {
        let city = match Text::new("By:").with_placeholder("Skriv bynavn...").prompt() {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        println!("Søger...");
        match session.search(&city).await? {
            SearchState::Success(summary) => println!("{}\n", render::summary(summary)),
            SearchState::Failed(kind) => eprintln!("{}\n", kind.user_message()),
            SearchState::Idle | SearchState::Searching => {}
        }
    }

    Ok(())
}
