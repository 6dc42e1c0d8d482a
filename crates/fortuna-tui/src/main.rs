use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use fortuna_core::{ask, build_service, ChatSession, CompletionService, Config, Provider};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod content;
mod handler;
#[cfg(test)]
mod test_support;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "fortuna")]
#[command(about = "Fortuna Major landing page and AI sales assistant in your terminal")]
#[command(version)]
struct Cli {
    /// AI provider to use (gemini or openai)
    #[arg(short, long, global = true)]
    provider: Option<String>,
    /// Model to request from the provider
    #[arg(short, long, global = true)]
    model: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive page with the chat assistant (default)
    Chat,
    /// Ask the assistant a single question and print the reply
    Ask {
        /// Your question
        question: Vec<String>,
    },
    /// List known models for the selected provider
    Models {
        /// Save this model (and the selected provider) as the default
        #[arg(long, value_name = "MODEL")]
        set: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = init_logging() {
        eprintln!("Logging disabled: {}", err);
    }

    let config = resolve_config(&cli)?;
    let provider = Provider::from_config(&config);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let service = build_service(provider, &config);
            run_tui(service, provider).await
        }
        Commands::Ask { question } => {
            let service = build_service(provider, &config);
            ask_once(service, &question.join(" ")).await
        }
        Commands::Models { set: Some(model) } => save_default_model(provider, &model),
        Commands::Models { set: None } => {
            println!("{} models:", provider.display_name());
            for model in provider.list_models() {
                println!("  • {}", model);
            }
            Ok(())
        }
    }
}

/// Log to a file in the config directory; the terminal belongs to the UI
fn init_logging() -> Result<()> {
    let log_dir = Config::config_dir()?;
    fs::create_dir_all(&log_dir)?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("fortuna.log"))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("FORTUNA_LOG")
                .unwrap_or_else(|_| "fortuna_core=info,fortuna=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}

/// Config file overlaid with command-line flags
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "could not read config, using defaults");
        Config::new()
    });

    if let Some(name) = &cli.provider {
        let provider = Provider::parse(name)
            .ok_or_else(|| anyhow!("Unknown provider '{}'. Use gemini or openai.", name))?;

        // A saved model belongs to the saved provider
        if Provider::from_config(&config) != provider {
            config.model = None;
        }
        config.provider = Some(provider.as_str().to_string());
    }

    if let Some(model) = &cli.model {
        config.model = Some(model.clone());
    }

    Ok(config)
}

/// Persist the default model without the one-off flags folded into it
fn save_default_model(provider: Provider, model: &str) -> Result<()> {
    let mut saved = Config::load()?;
    saved.set_default_model(provider, model);
    saved.save()?;

    info!(provider = provider.as_str(), model, "saved default model");
    println!("Default model set to {} ({})", model, provider.display_name());
    Ok(())
}

async fn ask_once(service: Arc<dyn CompletionService>, question: &str) -> Result<()> {
    info!(model = service.model(), "headless question");

    match ask(service, question).await {
        Some(reply) => {
            println!("{}", reply.content);
            Ok(())
        }
        None => bail!("Question is empty"),
    }
}

async fn run_tui(service: Arc<dyn CompletionService>, provider: Provider) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let mut events = EventHandler::new();
    let session = ChatSession::new(service, events.dispatch_sender());
    let mut app = App::new(session, provider);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Late outcomes after this point are dropped
    app.session.teardown();
    tui::restore()?;
    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }
    }
    Ok(())
}
