use clap::Parser;
use hrms_client::ClientConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // --- Tracing ---
    // Logs go to stderr so printed drafts stay pipeable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "hrms_onboarding=debug,hrms_client=debug,hrms_events=info,hrms_onboard=info".into()
        }))
        .with(
            cli.log_json
                .then(|| fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with((!cli.log_json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();

    // --- Configuration ---
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    tracing::info!(
        api_url = %config.api_url,
        file_base_url = %config.file_base_url,
        timeout_secs = config.request_timeout_secs,
        "Loaded client configuration"
    );

    match cli.command {
        Commands::Template { output } => commands::template(output.as_deref()).await,
        Commands::Run { draft } => commands::run(&config, &draft).await,
        Commands::Fetch {
            employee_id,
            output,
        } => commands::fetch(&config, employee_id, output.as_deref()).await,
    }
}
