pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::cli::{InMemorySource, LocalSink, LocalSource};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{engine::MatchEngine, matcher::Matcher, report::MatchReport};
pub use crate::domain::model::{Group, MatchSet, PreferenceList};
pub use crate::utils::error::{MatchError, Result};
