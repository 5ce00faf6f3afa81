use clap::{Args, Parser, Subcommand};

use crate::config::ConfigOverrides;

/// Infosweb — activate and deactivate Infosweb users through the integration API
#[derive(Debug, Parser)]
#[command(name = "infosweb", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Base URL for the Infosweb API (overrides INFOSWEB_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Client ID for the OAuth token endpoint (overrides INFOSWEB_CLIENT_ID)
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// Client secret for the OAuth token endpoint (overrides INFOSWEB_CLIENT_SECRET)
    #[arg(long, global = true)]
    pub client_secret: Option<String>,

    /// HTTP timeout in seconds (default: 10)
    #[arg(long, global = true)]
    pub timeout: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Retrieve an access token
    Token {
        /// Only print the access token value instead of the full JSON response
        #[arg(long)]
        raw: bool,
    },

    /// Activate a user
    Activate(UserArgs),

    /// Deactivate a user
    Deactivate(UserArgs),
}

#[derive(Debug, Args)]
pub struct UserArgs {
    /// `nombre_usuario` to process
    pub username: String,

    /// Existing bearer token to reuse (skips requesting a fresh one)
    #[arg(long)]
    pub access_token: Option<String>,
}

impl Cli {
    /// Command-line values that take precedence over the environment.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.global.base_url.clone(),
            client_id: self.global.client_id.clone(),
            client_secret: self.global.client_secret.clone(),
            access_token: None,
            timeout_secs: self.global.timeout,
        }
    }
}
