//! PronounDB Client
//!
//! Looks up a user's pronouns on [PronounDB](https://pronoundb.org) from their
//! identifier on Discord, Twitter, Twitch, GitHub or Minecraft.
//!
//! PronounDB keys Twitter, Twitch and GitHub accounts by numeric id, so usernames
//! on those platforms are first translated through the platform's own service.
//! Discord snowflakes and Minecraft UUIDs are passed through as-is.
//!
//! # Example
//!
//! ```no_run
//! use pronoundb_client::PronounDbClient;
//!
//! # async fn example() -> Result<(), pronoundb_client::PronounDbError> {
//! let client = PronounDbClient::builder().capitalize(false).build()?;
//!
//! let pronouns = client.get_discord_pronouns("347366054806159360").await?;
//! println!("{pronouns}"); // "he/him"
//!
//! let pronouns = client
//!     .get_twitch_pronouns("thecaptain8771", "client-id", "client-secret")
//!     .await?;
//! println!("{pronouns}");
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod lookup;
mod platform;
mod pronouns;
mod resolve;
mod types;

pub use client::{ClientBuilder, PronounDbClient, DEFAULT_BASE_URL, USER_AGENT};
pub use error::{ErrorKind, PronounDbError, Result, Stage};
pub use platform::{Platform, PlatformUser, TwitchCredentials};
pub use pronouns::{lookup, PronounCode};
pub use resolve::{extract_scope_id, Endpoints};
