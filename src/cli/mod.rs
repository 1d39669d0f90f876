pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::GatewayClient;

#[derive(Parser)]
#[command(name = "moderate")]
#[command(about = "Moderate CLI - Command-line client for the joke moderation API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "MODERATE_SERVER", default_value = "http://localhost:3004", help = "Moderation API base URL")]
    pub server: String,

    #[arg(long, global = true, env = "MODERATE_TOKEN", hide_env_values = true, help = "Bearer token from `moderate login`")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Exchange operator credentials for a token")]
    Login {
        #[arg(help = "Operator email")]
        email: String,
        #[arg(long, env = "MODERATE_PASSWORD", hide_env_values = true, help = "Operator password")]
        password: String,
    },

    #[command(about = "Check whether a token is valid")]
    Verify {
        #[arg(help = "Token to verify (defaults to --token)")]
        token: Option<String>,
    },

    #[command(about = "Joke type management")]
    Types {
        #[command(subcommand)]
        cmd: commands::types::TypesCommands,
    },

    #[command(about = "List jokes awaiting moderation")]
    Pending {
        #[arg(long, default_value_t = 1, help = "Page number")]
        page: u32,
        #[arg(long, default_value_t = 10, help = "Page size")]
        limit: u32,
    },

    #[command(about = "Patch a joke")]
    Update(commands::jokes::UpdateArgs),

    #[command(about = "Approve a joke and publish it to the delivery service")]
    Approve {
        #[arg(help = "Joke ID")]
        id: String,
    },

    #[command(about = "Reject a joke")]
    Reject {
        #[arg(help = "Joke ID")]
        id: String,
    },

    #[command(about = "Delete a joke")]
    Delete {
        #[arg(help = "Joke ID")]
        id: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = GatewayClient::new(&cli.server, cli.token.clone())?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&client, &email, &password, output_format).await,
        Commands::Verify { token } => {
            let token = token
                .or(cli.token)
                .ok_or_else(|| anyhow::anyhow!("No token given; pass one or set --token"))?;
            commands::auth::verify(&client, &token, output_format).await
        }
        Commands::Types { cmd } => commands::types::handle(&client, cmd, output_format).await,
        Commands::Pending { page, limit } => commands::jokes::pending(&client, page, limit, output_format).await,
        Commands::Update(args) => commands::jokes::update(&client, args, output_format).await,
        Commands::Approve { id } => {
            commands::jokes::set_status(&client, &id, crate::models::JokeStatus::Approved, output_format).await
        }
        Commands::Reject { id } => {
            commands::jokes::set_status(&client, &id, crate::models::JokeStatus::Rejected, output_format).await
        }
        Commands::Delete { id } => commands::jokes::delete(&client, &id, output_format).await,
    }
}
