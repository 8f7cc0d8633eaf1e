use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::error;

pub const LINKS_FILE: &str = "links.json";
pub const SERIAL_COMMANDS_FILE: &str = "2308.json";

/// Entry of the home page links directory
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

/// Entry of the serial command reference page
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SerialCommand {
    pub command: String,
    #[serde(default)]
    pub description: String,
}

async fn read_entries<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&content).with_context(|| format!("Invalid JSON: {}", path.display()))
}

/// Read a JSON array from the data directory, an unreadable file yields no entries
pub async fn load_entries<T: DeserializeOwned>(data_dir: &Path, filename: &str) -> Vec<T> {
    match read_entries(&data_dir.join(filename)).await {
        Ok(entries) => entries,
        Err(err) => {
            error!(?err, filename, "failed to load entries");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_links() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(LINKS_FILE),
            r#"[{"name":"GitHub","url":"https://github.com"}]"#,
        )
        .unwrap();
        let links: Vec<Link> = load_entries(dir.path(), LINKS_FILE).await;
        assert_eq!(1, links.len());
        assert_eq!("GitHub", links[0].name);
        assert_eq!("https://github.com", links[0].url);
    }

    #[tokio::test]
    async fn description_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SERIAL_COMMANDS_FILE),
            r#"[{"command":"AT+RST"},{"command":"AT","description":"ping"}]"#,
        )
        .unwrap();
        let commands: Vec<SerialCommand> = load_entries(dir.path(), SERIAL_COMMANDS_FILE).await;
        assert_eq!("", commands[0].description);
        assert_eq!("ping", commands[1].description);
    }

    #[tokio::test]
    async fn missing_or_invalid_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let links: Vec<Link> = load_entries(dir.path(), LINKS_FILE).await;
        assert!(links.is_empty());

        std::fs::write(dir.path().join(LINKS_FILE), "{").unwrap();
        let links: Vec<Link> = load_entries(dir.path(), LINKS_FILE).await;
        assert!(links.is_empty());
    }
}
