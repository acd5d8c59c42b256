//! Command-line arguments and environment configuration

use std::time::Duration;

use clap::Parser;
use pronoundb_client::{Platform, TwitchCredentials, DEFAULT_BASE_URL};

use crate::error::{CliError, Result};

/// Look up a user's pronouns on PronounDB
#[derive(Debug, Parser)]
#[command(name = "pronoundb", version)]
pub struct Args {
    /// Platform the user is on: discord, twitter, twitch, github or minecraft
    pub platform: Platform,

    /// Discord id, Twitter handle, Twitch login, GitHub login or Minecraft UUID
    pub id: String,

    /// PronounDB instance [env: PRONOUNDB_BASE_URL]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Print labels in lowercase ("he/him" instead of "He/Him")
    #[arg(long)]
    pub lowercase: bool,

    /// Print the raw PronounDB code instead of a label
    #[arg(long)]
    pub code: bool,

    /// Per-request timeout in seconds [env: PRONOUNDB_TIMEOUT_SECS]
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Twitch application client id [env: TWITCH_CLIENT_ID]
    #[arg(long)]
    pub twitch_client_id: Option<String>,

    /// Twitch application client secret [env: TWITCH_CLIENT_SECRET]
    #[arg(long)]
    pub twitch_client_secret: Option<String>,
}

/// Fully resolved settings for one lookup
#[derive(Debug)]
pub struct CliConfig {
    pub platform: Platform,
    pub id: String,
    pub base_url: String,
    pub capitalize: bool,
    pub print_code: bool,
    pub timeout: Option<Duration>,
    pub twitch: Option<TwitchCredentials>,
}

/// Merge arguments with environment variables; arguments win
pub fn load_config(args: Args, env: impl Fn(&str) -> Option<String>) -> Result<CliConfig> {
    let base_url = args
        .base_url
        .or_else(|| env("PRONOUNDB_BASE_URL"))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let timeout_secs = match args.timeout_secs {
        Some(secs) => Some(secs),
        None => env("PRONOUNDB_TIMEOUT_SECS")
            .map(|s| {
                s.parse::<u64>().map_err(|_| {
                    CliError::Config(format!("PRONOUNDB_TIMEOUT_SECS is not a number: {s:?}"))
                })
            })
            .transpose()?,
    };

    let twitch = if args.platform == Platform::Twitch {
        let client_id = args
            .twitch_client_id
            .or_else(|| env("TWITCH_CLIENT_ID"))
            .ok_or_else(|| CliError::Config("missing TWITCH_CLIENT_ID".to_string()))?;
        let client_secret = args
            .twitch_client_secret
            .or_else(|| env("TWITCH_CLIENT_SECRET"))
            .ok_or_else(|| CliError::Config("missing TWITCH_CLIENT_SECRET".to_string()))?;
        Some(TwitchCredentials::new(client_id, client_secret))
    } else {
        None
    };

    Ok(CliConfig {
        platform: args.platform,
        id: args.id,
        base_url,
        capitalize: !args.lowercase,
        print_code: args.code,
        timeout: timeout_secs.map(Duration::from_secs),
        twitch,
    })
}
