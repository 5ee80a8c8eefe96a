use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc;

use weather_bot::application::services::UpdateProcessor;
use weather_bot::domain::traits::Bot;
use weather_bot::infrastructure::adapters::console::ConsoleAdapter;
use weather_bot::infrastructure::adapters::telegram::TelegramAdapter;
use weather_bot::infrastructure::config::{self, Config, Environment};
use weather_bot::infrastructure::logging;

#[derive(Parser)]
#[command(name = "weather-bot")]
#[command(about = "Weather and clothing advice bot for Telegram", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, env = "CONFIG_PATH_WEATHER")]
    config: Option<String>,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Telegram bot
    Run,
    /// Read locations from stdin and print replies (dev mode)
    Console,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run | Commands::Console => {
            let console = matches!(cli.command, Commands::Console);
            run_bot(cli.config.as_deref(), cli.token, console)
        }
        Commands::Version => {
            println!("weather-bot v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::InitConfig => init_config(),
    }
}

fn load_config(config_path: Option<&str>) -> Result<Config, String> {
    let path = Config::resolve_path(config_path).map_err(|e| e.to_string())?;
    Config::load_with_env(&path).map_err(|e| format!("{} ({})", e, path.display()))
}

fn run_bot(config_path: Option<&str>, token_override: Option<String>, console: bool) -> ExitCode {
    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from the file, so fall back to defaults here
            logging::init(Environment::default());
            tracing::error!("Cannot load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(token) = token_override {
        config.telegram_bot.telegram_bot_token = token;
    }

    logging::init(config.env);
    tracing::info!(env = ?config.env, "Starting weather and recommendation bot");

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = if console {
        rt.block_on(run_console_bot(&config))
    } else {
        rt.block_on(run_telegram_bot(&config))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_telegram_bot(config: &Config) -> Result<(), String> {
    let token = config.bot_token().map_err(|e| e.to_string())?;

    let mut bot = TelegramAdapter::new(token)
        .map_err(|e| format!("Error initializing bot: {}", e))?;
    bot.fetch_bot_info()
        .await
        .map_err(|e| format!("Error authorizing bot: {}", e))?;
    tracing::info!("Authorized on account @{}", bot.bot_info().username);

    if let Err(e) = bot.register_commands().await {
        tracing::warn!("Failed to register commands: {}", e);
    }

    let bot = Arc::new(bot);
    let processor = UpdateProcessor::from_config(Arc::clone(&bot), config)
        .map_err(|e| format!("Error creating API clients: {}", e))?;

    let (tx, rx) = mpsc::unbounded_channel();
    let poller = Arc::clone(&bot);
    tokio::spawn(async move { poller.poll_updates(tx).await });

    processor.run(rx).await;
    Ok(())
}

async fn run_console_bot(config: &Config) -> Result<(), String> {
    let bot = Arc::new(ConsoleAdapter::new());
    let processor = UpdateProcessor::from_config(Arc::clone(&bot), config)
        .map_err(|e| format!("Error creating API clients: {}", e))?;

    tracing::info!("Console mode: type a city name, Ctrl-D to exit");

    let (tx, rx) = mpsc::unbounded_channel();
    let reader = Arc::clone(&bot);
    let input = tokio::spawn(async move { reader.read_lines(tx).await });

    processor.run(rx).await;

    match input.await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(format!("Console input failed: {}", e)),
        Err(e) => Err(format!("Console reader panicked: {}", e)),
    }
}

fn init_config() -> ExitCode {
    match serde_yaml::to_string(&Config::default()) {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and point {} at it.", config::CONFIG_PATH_ENV);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to render config: {}", e);
            ExitCode::FAILURE
        }
    }
}
