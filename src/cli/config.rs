use std::fs;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::session::FileSessionStore;

pub fn get_config_dir(app_config: &AppConfig) -> anyhow::Result<PathBuf> {
    let config_dir = app_config.session.resolve_dir()?;

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Session file shared by every CLI invocation on this machine.
pub fn open_session_store(app_config: &AppConfig) -> anyhow::Result<FileSessionStore> {
    let config_dir = get_config_dir(app_config)?;
    tracing::debug!(dir = %config_dir.display(), "using session directory");
    Ok(FileSessionStore::in_dir(&config_dir)?)
}

/// Read a password from `--password` or, failing that, one line of stdin.
pub fn password_or_prompt(provided: Option<String>, prompt: &str) -> anyhow::Result<String> {
    if let Some(password) = provided {
        return Ok(password);
    }
    eprint!("{}: ", prompt);
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// JSON request body from `--data` or stdin.
pub fn read_json_input(data: Option<String>) -> anyhow::Result<serde_json::Value> {
    let raw = match data {
        Some(raw) => raw,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    serde_json::from_str(&raw).map_err(|e| anyhow::anyhow!("Request body is not valid JSON: {}", e))
}

/// Content type for an upload, guessed from the file extension.
pub fn guess_content_type(path: &std::path::Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "csv" => "text/csv",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => return None,
    };
    Some(mime.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("logo.PNG")).as_deref(), Some("image/png"));
        assert_eq!(
            guess_content_type(Path::new("students.xlsx")).as_deref(),
            Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        );
        assert_eq!(guess_content_type(Path::new("notes")), None);
    }

    #[test]
    fn test_read_json_input_from_flag() {
        let value = read_json_input(Some(r#"{"name":"Class 5"}"#.to_string())).unwrap();
        assert_eq!(value["name"], "Class 5");
        assert!(read_json_input(Some("{".to_string())).is_err());
    }
}
