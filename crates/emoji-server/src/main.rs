use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use emoji_llm::providers::anthropic::DEFAULT_BASE_URL;
use emoji_server::config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PUBLIC_DIR};
use emoji_server::{logging::init_logging, run_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "emoji-server")]
#[command(about = "Edit stored SVG emoji with a generative model")]
#[command(version)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Server port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory containing `assets/<category>/<id>.svg`
    #[arg(long, env = "PUBLIC_DIR", default_value = DEFAULT_PUBLIC_DIR)]
    public_dir: PathBuf,

    /// Anthropic API key
    #[arg(long, env = "CLAUDE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Anthropic API base URL
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    anthropic_base_url: String,

    /// Worker threads (actix default when omitted)
    #[arg(long, env = "WORKERS")]
    workers: Option<usize>,

    /// Enable debug logging
    #[arg(long, env = "DEBUG", default_value_t = false)]
    debug: bool,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    log_json: bool,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            public_dir: cli.public_dir,
            api_key: cli.api_key,
            anthropic_base_url: cli.anthropic_base_url,
            workers: cli.workers,
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.debug, cli.log_json);

    if cli.debug {
        log::debug!("Debug mode enabled");
    }

    let config = ServerConfig::from(cli);
    let address = config.bind_address();

    run_server(config)
        .await
        .with_context(|| format!("emoji service on {address} failed"))
}
