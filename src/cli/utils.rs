use serde_json::{json, Map, Value};

use crate::api::data_list;
use crate::cli::OutputFormat;
use crate::recovery::Navigator;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = Map::new();
            response.insert("success".to_string(), json!(true));
            response.insert("message".to_string(), json!(message));

            match data {
                Some(Value::Object(fields)) => response.extend(fields),
                Some(other) => {
                    response.insert("data".to_string(), other);
                }
                None => {}
            }

            println!("{}", serde_json::to_string_pretty(&Value::Object(response))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output the `data` list of a response, one record per line in text mode
pub fn output_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    response: &Value,
) -> anyhow::Result<()> {
    let items = data_list(response);

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: items
            }))?);
        }
        OutputFormat::Text => {
            if items.is_empty() {
                println!("No {} found", collection_name);
                return Ok(());
            }
            for item in &items {
                println!("{}", summary_line(item));
            }
            println!("{} {}", items.len(), collection_name);
        }
    }
    Ok(())
}

/// Output a single record or arbitrary response body
pub fn output_record(output_format: &OutputFormat, record: &Value) -> anyhow::Result<()> {
    let record = record.get("data").unwrap_or(record);
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Text => match record {
            Value::Object(fields) => {
                for (key, value) in fields {
                    println!("{}: {}", key, plain(value));
                }
            }
            other => println!("{}", plain(other)),
        },
    }
    Ok(())
}

/// Message the backend attached to a response, or `fallback`
pub fn response_message(response: &Value, fallback: &str) -> String {
    response
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn summary_line(item: &Value) -> String {
    let id = item
        .get("_id")
        .or_else(|| item.get("id"))
        .map(plain)
        .unwrap_or_default();
    let label = ["name", "loginId", "title", "designation"]
        .iter()
        .find_map(|key| item.get(*key))
        .map(plain)
        .unwrap_or_else(|| plain(item));
    if id.is_empty() {
        label
    } else {
        format!("{}  {}", id, label)
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Terminal stand-in for the browser: print the notice and point at the login command.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn redirect(&self, target: &str) {
        tracing::debug!(target = %target, "login redirect");
        eprintln!("Sign in again with `institution auth login-institution <code>` or `institution auth login-staff <mobile>`");
    }
}
