use clap::Subcommand;
use serde_json::json;

use crate::cli::client::GatewayClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum TypesCommands {
    #[command(about = "List joke types")]
    List,

    #[command(about = "Create a joke type")]
    Create {
        #[arg(help = "Type name")]
        name: String,
    },
}

pub async fn handle(client: &GatewayClient, cmd: TypesCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TypesCommands::List => {
            let body = client.get("/api/v1/moderate/types", &[]).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        TypesCommands::Create { name } => {
            let body = client.post("/api/v1/moderate/types", &json!({ "name": name })).await?;
            output_success(&output_format, &format!("Joke type '{}' created", name), Some(body))
        }
    }
}
