use serde_json::{json, Value};

use crate::cli::client::GatewayClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub async fn login(
    client: &GatewayClient,
    email: &str,
    password: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let body = client
        .post("/api/v1/auth/login", &json!({ "email": email, "password": password }))
        .await?;

    match output_format {
        OutputFormat::Json => output_success(&output_format, "Authentication successful", Some(body)),
        OutputFormat::Text => {
            let token = body
                .get("token")
                .and_then(Value::as_str)
                .ok_or_else(|| anyhow::anyhow!("login response carried no token"))?;
            output_success(&output_format, "Authentication successful", None)?;
            println!("export MODERATE_TOKEN={}", token);
            Ok(())
        }
    }
}

pub async fn verify(client: &GatewayClient, token: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let body = client.post("/api/v1/auth/verify", &json!({ "token": token })).await?;

    if body.get("valid").and_then(Value::as_bool) == Some(true) {
        let email = body.pointer("/user/email").and_then(Value::as_str).unwrap_or("unknown");
        output_success(&output_format, &format!("Token is valid for {}", email), Some(body.clone()))
    } else {
        anyhow::bail!("Invalid token")
    }
}
