//! Config file loading

use crate::error::Result;
use std::path::Path;
use tracing::info;
use verdant::LiveConfig;

/// Read and validate a JSON [`LiveConfig`]. Missing fields take defaults.
pub fn load_config(path: &Path) -> Result<LiveConfig> {
    let text = std::fs::read_to_string(path)?;
    let config: LiveConfig = serde_json::from_str(&text)?;
    config.validate()?;
    info!(path = %path.display(), "loaded live config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LiveError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_partial() {
        let file = write(r#"{"seed": 9, "series_cap": 40}"#);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.series_cap, 40);
        assert_eq!(config.schedule.readouts.interval_ms, 5_000);
    }

    #[test]
    fn test_load_errors() {
        let bad_json = write("{ not json");
        assert!(matches!(load_config(bad_json.path()), Err(LiveError::Json(_))));

        let invalid = write(r#"{"series_cap": 0}"#);
        assert!(matches!(load_config(invalid.path()), Err(LiveError::Verdant(_))));

        let missing = Path::new("/nonexistent/verdant-live.json");
        assert!(matches!(load_config(missing), Err(LiveError::Io(_))));
    }
}
