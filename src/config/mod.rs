pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, OutputFormat};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "stable-match")]
#[command(about = "Compute a stable matching from a preference file")]
pub struct CliConfig {
    /// Preference file, one `<type> <name> <pref>...` record per line; '-' reads stdin
    #[arg(default_value = "prefs.txt")]
    pub input: String,

    /// Type token of the proposing group (defaults to the first type in the file)
    #[arg(long)]
    pub proposer: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write results here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Check the result for blocking pairs against the input preferences
    #[arg(long)]
    pub verify: bool,

    /// Print every preference list before and after matching
    #[arg(long)]
    pub show_prefs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn proposer(&self) -> Option<&str> {
        self.proposer.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn verify_stability(&self) -> bool {
        self.verify
    }

    fn show_preferences(&self) -> bool {
        self.show_prefs
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        if let Some(proposer) = &self.proposer {
            validation::validate_non_empty_string("proposer", proposer)?;
        }
        Ok(())
    }
}
