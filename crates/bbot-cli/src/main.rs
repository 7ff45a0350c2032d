use anyhow::Result;
use bbot_core::{ModelSelection, Settings};
use clap::Parser;
use std::path::PathBuf;

mod app;
mod commands;
mod setup;
mod theme;

#[derive(Parser)]
#[command(name = "bbot")]
#[command(about = "BBot - chat with OpenAI or Anthropic models from the terminal")]
#[command(version)]
struct Cli {
    /// Send a single prompt, print the reply and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// LLM provider (openai, anthropic)
    #[arg(long)]
    provider: Option<String>,

    /// Model to use; must be one of the provider's models
    #[arg(short, long)]
    model: Option<String>,

    /// API key (otherwise read from the environment or asked for)
    #[arg(long)]
    api_key: Option<String>,

    /// Directory where conversations are saved
    #[arg(long)]
    history_dir: Option<PathBuf>,

    /// Choose provider and model interactively before starting
    #[arg(long)]
    setup: bool,

    /// Color theme (dark, dracula, plain)
    #[arg(long, default_value = "dark")]
    theme: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load();
    setup::apply_overrides(&mut settings, cli.provider.as_deref(), cli.model.as_deref())?;
    if let Some(dir) = cli.history_dir {
        settings.history_dir = dir;
    }

    if cli.setup {
        let mut selection = ModelSelection::new(settings.provider);
        selection.select_model(&settings.model)?;
        setup::choose_model(&mut std::io::stdin().lock(), &mut std::io::stdout(), &mut selection)?;
        settings.provider = selection.provider();
        settings.model = selection.model().to_string();
    }

    let api_key = match cli.api_key.or_else(|| settings.api_key()) {
        Some(key) => key,
        None => setup::prompt_api_key(
            &mut std::io::stdin().lock(),
            &mut std::io::stdout(),
            settings.provider,
        )?,
    };

    let config = settings.into_config(api_key)?;
    tracing::debug!(?config, "session configured");

    if let Some(prompt) = cli.prompt {
        app::run_single_prompt(&config, &prompt).await?;
    } else {
        app::run_repl(&config, &theme::Theme::by_name(&cli.theme)).await?;
    }

    Ok(())
}
