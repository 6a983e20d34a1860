//! Configuration system for ClaimGuard.
//!
//! Uses `figment` for layered configuration: defaults -> user config file ->
//! workspace config file -> explicit file -> environment -> overrides.
//! Configuration is loaded from the platform config directory
//! (`~/.config/claimguard/config.toml` on Linux) and/or
//! `.claimguard/config.toml` in the workspace directory.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Top-level configuration for the ClaimGuard pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimGuardConfig {
    pub generative: GenerativeConfig,
    pub encyclopedia: EncyclopediaConfig,
    pub analysis: AnalysisConfig,
    pub counter: CounterConfig,
    pub pipeline: PipelineConfig,
}

/// Generative text service (Ollama-compatible) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerativeConfig {
    /// When false, no request is ever sent and every caller takes its fallback.
    pub enabled: bool,
    /// Base URL of the service, without the `/api/generate` suffix.
    pub base_url: String,
    /// Model identifier passed in every request.
    pub model: String,
    /// Total request timeout in seconds.
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://localhost:11434".to_string(),
            model: "gamma3".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}

/// Encyclopedic summary service (Wikipedia REST) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncyclopediaConfig {
    pub enabled: bool,
    /// REST API root; summaries are fetched from `{base_url}/page/summary/{topic}`.
    pub base_url: String,
    /// Root used to construct a page URL when the service does not provide one.
    pub page_base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for EncyclopediaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://en.wikipedia.org/api/rest_v1".to_string(),
            page_base_url: "https://en.wikipedia.org/wiki".to_string(),
            user_agent: format!(
                "ClaimGuard/{} (https://github.com/claimguard/claimguard)",
                env!("CARGO_PKG_VERSION")
            ),
            timeout_secs: 5,
            connect_timeout_secs: 5,
        }
    }
}

/// What the analysis orchestrator returns when the generative path fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedMode {
    /// Run the local pattern-based analyzer.
    #[default]
    Heuristic,
    /// Return the fixed "service unavailable" analysis.
    Neutral,
}

impl std::fmt::Display for DegradedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegradedMode::Heuristic => write!(f, "heuristic"),
            DegradedMode::Neutral => write!(f, "neutral"),
        }
    }
}

/// Analysis orchestrator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub degraded_mode: DegradedMode,
    /// Fill entity, entities, sentiment, keywords and language locally even
    /// when the generative service answered.
    #[serde(default)]
    pub enrich_remote_results: bool,
}

/// Sampling and length settings for counter-narrative generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    /// Hard cap on generated text, including the trailing ellipsis.
    pub max_chars: usize,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_p: 0.8,
            max_tokens: 300,
            max_chars: 500,
        }
    }
}

/// Claim pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum trimmed claim length, in characters.
    pub min_claim_chars: usize,
    /// A counter-narrative is produced when `fake_probability` exceeds this.
    pub counter_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_claim_chars: 10,
            counter_threshold: 0.5,
        }
    }
}

impl ClaimGuardConfig {
    /// Validate this config and return any warnings.
    ///
    /// Returns an empty Vec if the config is valid. Problems are reported as
    /// human-readable messages rather than errors.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.generative.enabled && self.generative.timeout_secs == 0 {
            warnings.push("generative.timeout_secs is 0; every request will time out".to_string());
        }
        if self.encyclopedia.enabled && self.encyclopedia.timeout_secs == 0 {
            warnings
                .push("encyclopedia.timeout_secs is 0; every lookup will time out".to_string());
        }
        if self.generative.model.trim().is_empty() {
            warnings.push("generative.model is empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.pipeline.counter_threshold) {
            warnings.push(format!(
                "pipeline.counter_threshold ({}) is outside [0, 1]",
                self.pipeline.counter_threshold
            ));
        }
        if !(0.0..=2.0).contains(&self.counter.temperature) {
            warnings.push(format!(
                "counter.temperature ({}) is outside [0, 2]",
                self.counter.temperature
            ));
        }
        if !(0.0..=1.0).contains(&self.counter.top_p) {
            warnings.push(format!("counter.top_p ({}) is outside [0, 1]", self.counter.top_p));
        }
        if self.counter.max_chars < 4 {
            warnings.push(format!(
                "counter.max_chars ({}) leaves no room for text before the ellipsis",
                self.counter.max_chars
            ));
        }
        warnings
    }

    /// Disable both remote services.
    pub fn set_offline(&mut self) {
        self.generative.enabled = false;
        self.encyclopedia.enabled = false;
    }
}

/// Platform-specific user config file location.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "claimguard", "claimguard")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Workspace config file location.
pub fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".claimguard").join("config.toml")
}

/// Load configuration from all layers.
///
/// `config_file`, when given, must exist; it is merged after the user and
/// workspace files and before the environment.
pub fn load_config(
    workspace: Option<&Path>,
    config_file: Option<&Path>,
    overrides: Option<&ClaimGuardConfig>,
) -> Result<ClaimGuardConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(ClaimGuardConfig::default()));

    if let Some(user_config) = user_config_path()
        && user_config.exists()
    {
        figment = figment.merge(Toml::file(&user_config));
    }

    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    if let Some(path) = config_file {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        figment = figment.merge(Toml::file(path));
    }

    // Environment variables (CLAIMGUARD_GENERATIVE__MODEL, CLAIMGUARD_ANALYSIS__DEGRADED_MODE, ...)
    figment = figment.merge(Env::prefixed("CLAIMGUARD_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment.extract().map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })
}

/// Check whether any ClaimGuard configuration file exists (user-level or workspace-level).
pub fn config_exists(workspace: Option<&Path>) -> bool {
    if user_config_path().is_some_and(|p| p.exists()) {
        return true;
    }
    workspace.is_some_and(|ws| workspace_config_path(ws).exists())
}

/// Write the default configuration to `<workspace>/.claimguard/config.toml`.
///
/// Refuses to overwrite an existing file.
pub fn write_default_config(workspace: &Path) -> Result<PathBuf, ConfigError> {
    let path = workspace_config_path(workspace);
    if path.exists() {
        return Err(ConfigError::Invalid {
            message: format!("{} already exists", path.display()),
        });
    }
    let body = toml::to_string_pretty(&ClaimGuardConfig::default()).map_err(|e| {
        ConfigError::ParseError {
            message: e.to_string(),
        }
    })?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::Invalid {
            message: format!("cannot create {}: {}", parent.display(), e),
        })?;
    }
    std::fs::write(&path, body).map_err(|e| ConfigError::Invalid {
        message: format!("cannot write {}: {}", path.display(), e),
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = ClaimGuardConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: ClaimGuardConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.generative.model, config.generative.model);
        assert_eq!(
            deserialized.analysis.degraded_mode,
            config.analysis.degraded_mode
        );
        assert_eq!(deserialized.counter.max_chars, 500);
    }

    #[test]
    fn test_defaults() {
        let config = ClaimGuardConfig::default();
        assert_eq!(config.generative.base_url, "http://localhost:11434");
        assert_eq!(config.generative.model, "gamma3");
        assert_eq!(config.analysis.degraded_mode, DegradedMode::Heuristic);
        assert!(!config.analysis.enrich_remote_results);
        assert!((config.counter.temperature - 0.4).abs() < f32::EPSILON);
        assert!((config.counter.top_p - 0.8).abs() < f32::EPSILON);
        assert_eq!(config.counter.max_tokens, 300);
        assert_eq!(config.pipeline.min_claim_chars, 10);
        assert_eq!(config.generative.connect_timeout_secs, 5);
        assert_eq!(config.encyclopedia.connect_timeout_secs, 5);
    }

    #[test]
    fn test_validate_defaults_clean() {
        let warnings = ClaimGuardConfig::default().validate();
        assert!(
            warnings.is_empty(),
            "Default config should have no warnings, got: {:?}",
            warnings
        );
    }

    #[test]
    fn test_validate_flags_bad_values() {
        let mut config = ClaimGuardConfig::default();
        config.generative.timeout_secs = 0;
        config.pipeline.counter_threshold = 1.5;
        config.counter.max_chars = 2;
        let warnings = config.validate();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("generative.timeout_secs"));
    }

    #[test]
    fn test_set_offline() {
        let mut config = ClaimGuardConfig::default();
        config.set_offline();
        assert!(!config.generative.enabled);
        assert!(!config.encyclopedia.enabled);
    }

    #[test]
    fn test_load_config_with_overrides() {
        let mut overrides = ClaimGuardConfig::default();
        overrides.generative.model = "llama3.1:8b".to_string();
        overrides.analysis.degraded_mode = DegradedMode::Neutral;

        let config = load_config(None, None, Some(&overrides)).unwrap();
        assert_eq!(config.generative.model, "llama3.1:8b");
        assert_eq!(config.analysis.degraded_mode, DegradedMode::Neutral);
    }

    #[test]
    fn test_load_config_from_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_dir = dir.path().join(".claimguard");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(
            cfg_dir.join("config.toml"),
            r#"
[generative]
enabled = false
base_url = "http://127.0.0.1:9999"
model = "mistral:7b"
timeout_secs = 10
connect_timeout_secs = 2

[analysis]
degraded_mode = "neutral"

[pipeline]
min_claim_chars = 20
counter_threshold = 0.6
"#,
        )
        .unwrap();

        let config = load_config(Some(dir.path()), None, None).unwrap();
        assert!(!config.generative.enabled);
        assert_eq!(config.generative.model, "mistral:7b");
        assert_eq!(config.analysis.degraded_mode, DegradedMode::Neutral);
        assert_eq!(config.pipeline.min_claim_chars, 20);
        // Sections absent from the file keep their defaults.
        assert_eq!(config.counter.max_tokens, 300);
        assert!(config.encyclopedia.enabled);
        assert!(config_exists(Some(dir.path())));
    }

    #[test]
    fn test_env_overrides_workspace_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".claimguard")?;
            jail.create_file(
                ".claimguard/config.toml",
                r#"
[generative]
model = "mistral:7b"

[encyclopedia]
connect_timeout_secs = 3

[pipeline]
min_claim_chars = 20
"#,
            )?;
            jail.set_env("CLAIMGUARD_GENERATIVE__MODEL", "phi3");
            jail.set_env("CLAIMGUARD_ANALYSIS__DEGRADED_MODE", "neutral");

            let config =
                load_config(Some(jail.directory()), None, None).map_err(|e| e.to_string())?;
            assert_eq!(config.generative.model, "phi3");
            assert_eq!(config.analysis.degraded_mode, DegradedMode::Neutral);
            // Keys the environment leaves alone still come from the file.
            assert_eq!(config.pipeline.min_claim_chars, 20);
            assert_eq!(config.encyclopedia.connect_timeout_secs, 3);
            Ok(())
        });
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config(None, Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_write_default_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_default_config(dir.path()).unwrap();
        assert!(path.exists());
        let reloaded = load_config(Some(dir.path()), None, None).unwrap();
        assert_eq!(reloaded.generative.model, "gamma3");
        assert!(write_default_config(dir.path()).is_err());
    }
}
