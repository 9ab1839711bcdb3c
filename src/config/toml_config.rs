use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub proposer: Option<String>,
    pub verify: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
    pub show_preferences: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Loads a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MatchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MatchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` references (such as `${PREFS_DIR}`). Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MatchError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn proposer(&self) -> Option<&str> {
        self.matching.proposer.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }

    fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }

    fn verify_stability(&self) -> bool {
        self.matching.verify.unwrap_or(false)
    }

    fn show_preferences(&self) -> bool {
        self.output.show_preferences.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input.path", &self.input.path)?;

        if let Some(path) = &self.output.path {
            validation::validate_path("output.path", path)?;
        }

        if let Some(proposer) = &self.matching.proposer {
            validation::validate_non_empty_string("matching.proposer", proposer)?;
        }

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            validation::validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }
}
