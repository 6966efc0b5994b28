use clap::Parser;
use std::io;

mod handlers;
mod logging;
mod server;
mod state;

use logging::init_logging;
use scribe_llm::{validate_provider_config, ProviderConfig};
use server::run_server_with_config;

#[derive(Parser, Debug, Clone)]
#[command(name = "scribe-server")]
#[command(about = "Scribe prose-continuation HTTP server")]
#[command(version)]
struct Cli {
    /// Enable debug mode
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if cli.log_level.is_some() {
        // If RUST_LOG is set, use it
        env_logger::init();
    } else {
        init_logging(cli.debug);
    }

    let provider_config = ProviderConfig::from_env();
    if let Err(error) = validate_provider_config(&provider_config) {
        log::error!("Invalid provider configuration: {}", error);
        return Err(io::Error::new(io::ErrorKind::InvalidInput, error.to_string()));
    }

    log::info!("Starting scribe server on port {}", cli.port);
    log::info!("Provider: {}", provider_config.provider);

    run_server_with_config(cli.port, provider_config).await
}
