use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use keyword_monitor::application::messaging::MessageParser;
use keyword_monitor::domain::traits::{Bot, EventSource};
use keyword_monitor::infrastructure::adapters::console::{ConsoleAdapter, ConsoleEventSource};
use keyword_monitor::infrastructure::adapters::onebot::{OneBotAdapter, OneBotEventSource};
use keyword_monitor::infrastructure::config::Config;
use keyword_monitor::infrastructure::storage::JsonConfigStore;
use keyword_monitor::plugins::{KeywordMonitorPlugin, PluginManager};

#[derive(Parser)]
#[command(name = "keyword-monitor")]
#[command(about = "Group chat keyword monitor with admin alerts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// State file path (overrides config)
    #[arg(short, long)]
    state: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the monitor
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
            run_bot(cli.config, cli.state);
        }
        Commands::Version => {
            println!("keyword-monitor v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn load_config(config_path: &str) -> Config {
    if Path::new(config_path).exists() {
        match Config::load(config_path) {
            Ok(config) => config.with_env(),
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            }
        }
    } else {
        Config::load_env()
    }
}

fn run_bot(config_path: String, state_override: Option<PathBuf>) {
    let mut config = load_config(&config_path);
    if let Some(state) = state_override {
        config.monitor.state_file = state;
    }

    tracing::info!("Starting {}", config.bot.name);

    let platform = config.bot.platform.clone();
    let parser = MessageParser::new(&config.bot.prefix, &platform);

    let (bot, mut source) = match config.onebot() {
        Some(onebot) => {
            tracing::info!("Using OneBot API at {}", onebot.api_base);
            let bot: Arc<dyn Bot> = Arc::new(OneBotAdapter::new(onebot, &platform));
            let source: Box<dyn EventSource> = Box::new(OneBotEventSource::stdin(parser));
            (bot, source)
        }
        None => {
            tracing::info!("Using console adapter (dev mode)");
            let bot: Arc<dyn Bot> = Arc::new(ConsoleAdapter::new(&platform));
            let source: Box<dyn EventSource> = Box::new(ConsoleEventSource::stdin(parser));
            (bot, source)
        }
    };

    let store = JsonConfigStore::new(&config.monitor.state_file);
    let plugin = match KeywordMonitorPlugin::new(Box::new(store), bot.clone(), &config.bot.prefix, &platform) {
        Ok(plugin) => plugin,
        Err(e) => {
            tracing::error!("Failed to initialize plugin: {}", e);
            return;
        }
    };

    let mut manager = PluginManager::new();
    if let Err(e) = manager.register(plugin) {
        tracing::error!("{}", e);
        return;
    }
    tracing::info!("Plugin system initialized with {} plugins", manager.list_plugins().len());

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return;
        }
    };

    rt.block_on(async {
        tokio::select! {
            _ = manager.run(source.as_mut(), bot.as_ref()) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
            }
        }
        manager.shutdown().await;
    });
}

fn init_config() {
    match serde_yaml::to_string(&Config::default()) {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => tracing::error!("Failed to render default config: {}", e),
    }
}
