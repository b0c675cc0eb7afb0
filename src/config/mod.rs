use crate::models::{Configuration, ToolSettings};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Default location of the trained configuration artifact.
pub const DEFAULT_CONFIG_FILE: &str = "cssguard.json";

/// Default location of the optional tool settings file.
pub const DEFAULT_SETTINGS_FILE: &str = "cssguard.yaml";

/// Prefix of environment variables overriding settings (`CSSGUARD_REDUNDANCY_THRESHOLD=90`).
pub const ENV_PREFIX: &str = "CSSGUARD";

/// Configuration manager for the two files cssguard reads and writes.
///
/// - Trained configuration (`cssguard.json`): patterns, literal and ignored classes.
///   Written by `train`, read by `validate`.
/// - Tool settings (`cssguard.yaml`): optional user preferences, layered with
///   `CSSGUARD_*` environment variables.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    pub fn new<C, S>(config_path: C, settings_path: S) -> Self
    where
        C: AsRef<Utf8Path>,
        S: AsRef<Utf8Path>,
    {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            settings_path: settings_path.as_ref().to_path_buf(),
        }
    }

    /// Load the trained configuration.
    ///
    /// Unlike settings, a missing configuration is an error: there is nothing
    /// sensible to validate against until `train` has been run.
    pub fn load_configuration(&self) -> Result<Configuration> {
        let file_contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!(
                "Failed to read config {} (run 'cssguard train' first)",
                self.config_path
            )
        })?;

        let config = configuration_from_json(&file_contents)
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        tracing::info!(
            "Loaded config from {} ({} patterns, {} literals, {} ignored)",
            self.config_path,
            config.patterns.len(),
            config.literal_classes.len(),
            config.ignored.len()
        );
        Ok(config)
    }

    /// Save the trained configuration as pretty-printed JSON.
    pub fn save_configuration(&self, config: &Configuration) -> Result<()> {
        let json = configuration_to_json(config)?;

        if let Some(parent) = self.config_path.parent()
            && !parent.as_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent))?;
        }

        fs::write(&self.config_path, json)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Load tool settings.
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. built-in defaults
    /// 2. the YAML settings file, if it exists
    /// 3. `CSSGUARD_*` environment variables (lists are comma-separated)
    pub fn load_settings(&self) -> Result<ToolSettings> {
        self.load_settings_with_env(None)
    }

    /// `env` replaces the process environment when given.
    fn load_settings_with_env(
        &self,
        env: Option<::config::Map<String, String>>,
    ) -> Result<ToolSettings> {
        if !self.settings_path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::new(self.settings_path.as_str(), ::config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("ignore")
                    .with_list_parse_key("src_extensions")
                    .with_list_parse_key("src_excludes")
                    .source(env),
            )
            .build()
            .with_context(|| format!("Failed to load settings: {}", self.settings_path))?;

        let settings: ToolSettings = settings
            .try_deserialize()
            .with_context(|| format!("Invalid settings in {}", self.settings_path))?;

        tracing::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn save_settings(&self, settings: &ToolSettings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE, DEFAULT_SETTINGS_FILE)
    }
}

/// Serialize a configuration exactly as it is stored on disk.
///
/// Output is byte-identical for equal configurations.
pub fn configuration_to_json(config: &Configuration) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")?;
    json.push('\n');
    Ok(json)
}

/// Parse a stored configuration. Unknown fields are ignored and `null` lists read as empty.
pub fn configuration_from_json(json: &str) -> Result<Configuration> {
    serde_json::from_str(json).context("Malformed configuration JSON")
}
