use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::path::Path;

/// Load and validate settings from a YAML or JSON file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)
        .wrap_err_with(|| format!("Failed to read configuration '{}'", config_path.display()))?;

    let config: Config = match config_path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .wrap_err_with(|| format!("Malformed JSON configuration '{}'", config_path.display()))?,
        // An empty YAML document parses as unit; treat it as all defaults.
        _ if content.trim().is_empty() => Config::default(),
        _ => serde_yaml::from_str(&content)
            .wrap_err_with(|| format!("Malformed YAML configuration '{}'", config_path.display()))?,
    };

    config
        .validate()
        .wrap_err_with(|| format!("Invalid configuration '{}'", config_path.display()))?;

    Ok(config)
}

/// Load settings from `path`, or fall back to the built-in defaults
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path),
        None => {
            info!("No configuration file given, using built-in defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_load_yaml_config() {
        let yaml = r#"
tower_gap: 300
fiber_label: "OS2"
"#;
        let mut temp_file = Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.tower_gap, 300.0);
        assert_eq!(config.fiber_label, "OS2");
        assert_eq!(config.floor_width, 400.0);
    }

    #[test]
    fn test_load_json_config() {
        let json = r#"{ "switch_height": 40.0, "switch_draw_order": ["wifi", "data"] }"#;
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp_file, "{}", json).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.switch_height, 40.0);
        assert_eq!(config.switch_draw_order.len(), 2);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let temp_file = Builder::new().suffix(".yaml").tempfile().unwrap();
        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let mut temp_file = Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(temp_file, "floor_width: -10\n").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(format!("{:?}", err).contains("floor_width"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(load_config(Path::new("/nonexistent/settings.yaml")).is_err());
        assert!(load_config_or_default(None).is_ok());
    }
}
