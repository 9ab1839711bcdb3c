use crate::domain::model::LoadedGroups;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub trait PreferenceSource {
    fn load(&self) -> Result<LoadedGroups>;
}

pub trait ReportSink {
    fn write(&self, content: &str) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    /// Type token of the proposing group; `None` means the first type in the input.
    fn proposer(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
    fn output_path(&self) -> Option<&str>;
    fn verify_stability(&self) -> bool;
    fn show_preferences(&self) -> bool;
}
