use clap::Parser;
use newsfeed::{
    cli::{
        commands::{self, OutputFormat},
        Cli, Commands,
    },
    config::Settings,
    FeedManager, Result,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Logs go to stderr so rendered output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,newsfeed=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration, CLI flags win over the environment
    let mut settings = Settings::from_env()?;
    if let Some(feed_url) = cli.feed_url {
        settings.feed.rss_url = feed_url;
    }
    if let Some(proxy_url) = cli.proxy_url {
        settings.feed.proxy_url = proxy_url;
    }
    settings.validate()?;

    let manager = FeedManager::from_settings(&settings.feed);

    match cli.command {
        Commands::Fetch { json, sanitize } => {
            info!("Fetching {} via {}", manager.rss_url(), manager.proxy_url());
            let format = OutputFormat::from_flags(json, sanitize);
            let output = commands::fetch(&manager, &settings.http, format).await?;
            println!("{output}");
        }
        Commands::Render {
            path,
            json,
            sanitize,
        } => {
            let format = OutputFormat::from_flags(json, sanitize);
            let output = commands::render(&manager, &path, format).await?;
            println!("{output}");
        }
        Commands::Styles { css } => {
            println!("{}", commands::styles(&manager, css)?);
        }
        Commands::SelfTest => {
            if !commands::self_test().await {
                error!("Self-test failed");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
