//! pronoundb - look up a user's pronouns from the command line
//!
//! Resolves the user on their platform, asks PronounDB, and prints the label.

mod config;
mod error;

use clap::Parser;
use pronoundb_client::{Platform, PlatformUser, PronounCode, PronounDbClient};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::{load_config, Args, CliConfig};
use crate::error::{CliError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let config = load_config(args, |key| std::env::var(key).ok())?;
    info!(platform = %config.platform, base_url = %config.base_url, "Looking up pronouns");

    let client = build_client(&config)?;
    let user = platform_user(&config)?;
    let code = client.get_pronoun_code(&user).await?;

    println!("{}", render(&client, code, config.print_code));

    Ok(())
}

fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("pronoundb_cli=info".parse()?)
        .add_directive("pronoundb_client=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    };

    Ok(())
}

fn build_client(config: &CliConfig) -> Result<PronounDbClient> {
    let mut builder = PronounDbClient::builder()
        .base_url(config.base_url.as_str())
        .capitalize(config.capitalize);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

fn platform_user(config: &CliConfig) -> Result<PlatformUser<'_>> {
    let id = config.id.as_str();
    let user = match config.platform {
        Platform::Discord => PlatformUser::Discord(id),
        Platform::Twitter => PlatformUser::Twitter(id),
        Platform::Github => PlatformUser::Github(id),
        Platform::Minecraft => PlatformUser::Minecraft(id),
        Platform::Twitch => {
            let credentials = config
                .twitch
                .as_ref()
                .ok_or_else(|| CliError::Config("missing Twitch credentials".to_string()))?;
            PlatformUser::Twitch {
                login: id,
                credentials,
            }
        }
    };
    Ok(user)
}

/// Raw code with `--code`, otherwise the client's display label
fn render(client: &PronounDbClient, code: PronounCode, print_code: bool) -> String {
    if print_code {
        code.code().to_string()
    } else {
        client.display_label(code)
    }
}
