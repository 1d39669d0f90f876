use clap::Args;

use crate::cli::client::GatewayClient;
use crate::cli::utils::{output_jokes, output_success};
use crate::cli::OutputFormat;
use crate::models::{JokePatch, JokeStatus};

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(help = "Joke ID")]
    pub id: String,
    #[arg(long, help = "New content")]
    pub content: Option<String>,
    #[arg(long = "type", help = "New joke type")]
    pub joke_type: Option<String>,
    #[arg(long, help = "New author")]
    pub author: Option<String>,
    #[arg(long, value_parser = parse_status, help = "New status: pending, approved or rejected")]
    pub status: Option<JokeStatus>,
}

fn parse_status(raw: &str) -> Result<JokeStatus, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_lowercase()))
        .map_err(|_| format!("'{}' is not one of pending, approved, rejected", raw))
}

pub async fn pending(client: &GatewayClient, page: u32, limit: u32, output_format: OutputFormat) -> anyhow::Result<()> {
    let body = client
        .get("/api/v1/moderate/pending", &[("page", page.to_string()), ("limit", limit.to_string())])
        .await?;
    output_jokes(&output_format, &body)
}

pub async fn update(client: &GatewayClient, args: UpdateArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let patch = JokePatch {
        content: args.content,
        joke_type: args.joke_type,
        status: args.status,
        author: args.author,
    };
    if patch == JokePatch::default() {
        anyhow::bail!("Nothing to update; pass at least one of --content, --type, --author, --status");
    }

    send_patch(client, &args.id, &patch, output_format).await
}

pub async fn set_status(
    client: &GatewayClient,
    id: &str,
    status: JokeStatus,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    send_patch(client, id, &JokePatch::with_status(status), output_format).await
}

async fn send_patch(client: &GatewayClient, id: &str, patch: &JokePatch, output_format: OutputFormat) -> anyhow::Result<()> {
    let body = client
        .put("/api/v1/moderate/update", &[("id", id.to_string())], patch)
        .await?;

    let message = match body.get("message").and_then(|m| m.as_str()) {
        Some(message) if body.get("deliveryJoke").is_some() => message.to_string(),
        _ => format!("Joke {} updated", id),
    };
    output_success(&output_format, &message, Some(body))
}

pub async fn delete(client: &GatewayClient, id: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let body = client.delete("/api/v1/moderate/delete", &[("id", id.to_string())]).await?;
    output_success(&output_format, &format!("Joke {} deleted", id), Some(body))
}
