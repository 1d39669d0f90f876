use serde_json::{json, Value};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Print a raw API response: pretty JSON, or one line per joke in text mode
pub fn output_jokes(output_format: &OutputFormat, body: &Value) -> anyhow::Result<()> {
    let jokes = joke_list(body);

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(body)?);
        }
        OutputFormat::Text => match jokes {
            Some(jokes) if jokes.is_empty() => {
                return output_empty_collection(output_format, "jokes", "No pending jokes");
            }
            Some(jokes) => {
                for joke in jokes {
                    println!("{}", format_joke_line(joke));
                }
            }
            None => println!("{}", serde_json::to_string_pretty(body)?),
        },
    }
    Ok(())
}

/// Find the list of jokes in a pending response, bare or wrapped.
fn joke_list(body: &Value) -> Option<&Vec<Value>> {
    body.as_array().or_else(|| {
        ["data", "jokes", "items", "results"]
            .iter()
            .find_map(|key| body.get(key).and_then(Value::as_array))
    })
}

fn format_joke_line(joke: &Value) -> String {
    let field = |name: &str| joke.get(name).and_then(Value::as_str).unwrap_or("-");
    let id = joke.get("id").or_else(|| joke.get("_id")).and_then(Value::as_str).unwrap_or("-");

    format!("{}  [{}] ({}) {}", id, field("type"), field("status"), field("content"))
}
