use clap::{Parser, Subcommand};
use std::sync::Arc;

use serenity::all::GatewayIntents;
use serenity::Client;

use gatewarden::application::errors::BotError;
use gatewarden::application::routing::{ErrorBoundary, FailureStyle};
use gatewarden::application::{GuildGatekeeper, HandlerRegistry};
use gatewarden::domain::traits::{CommandSource, EventSource};
use gatewarden::handlers;
use gatewarden::infrastructure::adapters::DiscordAdapter;
use gatewarden::infrastructure::config::{load_prefixes, Config};
use gatewarden::infrastructure::modules::{DirectoryCommands, DirectoryEvents};

#[derive(Parser)]
#[command(name = "gatewarden")]
#[command(about = "Single-tenant Discord command dispatcher", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides BOT_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            if let Err(e) = run_bot(cli.config, cli.token) {
                tracing::error!("Fatal: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("gatewarden v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn run_bot(config_path: String, token_override: Option<String>) -> Result<(), BotError> {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    tracing::info!("Starting {}", config.bot.name);

    let token = Config::token(token_override)?;
    let prefixes = Arc::new(load_prefixes(
        &config.prefixes.file,
        &config.bot.default_prefix,
    )?);

    // Build the registry: built-ins first, then the module trees, so a disk
    // module with a duplicate name wins. Any load failure is fatal.
    let builtins = handlers::builtins(prefixes.clone());
    let disk_commands = DirectoryCommands::new(&config.modules.commands_dir);
    let disk_events = DirectoryEvents::new(&config.modules.events_dir);
    let command_sources: [&dyn CommandSource; 2] = [&builtins, &disk_commands];
    let event_sources: [&dyn EventSource; 2] = [&builtins, &disk_events];
    let registry = Arc::new(HandlerRegistry::load(&command_sources, &event_sources)?);

    let gatekeeper = GuildGatekeeper::new(
        config.gatekeeper.safe_guild,
        config.gatekeeper.log_channel,
    );
    let boundary = Arc::new(ErrorBoundary::new(FailureStyle {
        title: config.notices.failure_title.clone(),
        message: config.notices.failure_message.clone(),
        colour: 0xFF0000,
    }));
    let adapter = DiscordAdapter::new(registry, prefixes, gatekeeper, boundary);

    // What we want Discord to tell us about.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let rt = tokio::runtime::Runtime::new().map_err(|e| BotError::Internal(e.to_string()))?;
    rt.block_on(async {
        let mut client = Client::builder(&token, intents)
            .event_handler(adapter)
            .await
            .map_err(|e| BotError::Internal(format!("Failed to build client: {}", e)))?;

        client
            .start()
            .await
            .map_err(|e| BotError::Internal(format!("Gateway connection ended: {}", e)))
    })
}

fn init_config() {
    let config = Config::default();

    match serde_yaml::to_string(&config) {
        Ok(yaml) => {
            if let Err(e) = std::fs::write("config.yaml", yaml) {
                tracing::error!("Failed to write config.yaml: {}", e);
                return;
            }
            tracing::info!("Wrote config.yaml");
        }
        Err(e) => {
            tracing::error!("Failed to serialize default config: {}", e);
            return;
        }
    }

    let prefixes = &config.prefixes.file;
    if let Some(parent) = prefixes.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!("Failed to create {}: {}", parent.display(), e);
            return;
        }
    }
    if prefixes.exists() {
        tracing::info!("{} already exists, leaving it alone", prefixes.display());
    } else if let Err(e) = std::fs::write(prefixes, "{}\n") {
        tracing::error!("Failed to write {}: {}", prefixes.display(), e);
    } else {
        tracing::info!("Wrote {}", prefixes.display());
    }
}
