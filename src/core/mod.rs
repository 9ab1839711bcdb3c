pub mod engine;
pub mod loader;
pub mod matcher;
pub mod report;
pub mod stability;

pub use crate::domain::model::{Group, LoadedGroups, MatchSet, PreferenceList};
pub use crate::domain::ports::{ConfigProvider, OutputFormat, PreferenceSource, ReportSink};
pub use crate::utils::error::Result;
