use crate::core::loader;
use crate::core::{LoadedGroups, PreferenceSource, ReportSink};
use crate::utils::error::{MatchError, Result};
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

/// Reads preferences from a file, or from stdin when the path is `-`.
#[derive(Debug, Clone)]
pub struct LocalSource {
    path: String,
}

impl LocalSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceSource for LocalSource {
    fn load(&self) -> Result<LoadedGroups> {
        if self.path == "-" {
            return loader::load_reader(io::stdin().lock());
        }
        let file = File::open(&self.path)?;
        loader::load_reader(BufReader::new(file))
    }
}

#[derive(Debug, Clone)]
pub struct InMemorySource {
    content: String,
}

impl InMemorySource {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl PreferenceSource for InMemorySource {
    fn load(&self) -> Result<LoadedGroups> {
        Ok(loader::parse_preferences(&self.content))
    }
}

/// Writes rendered results to a file, or to stdout when no path is set.
#[derive(Debug, Clone, Default)]
pub struct LocalSink {
    path: Option<PathBuf>,
}

impl LocalSink {
    pub fn new(path: Option<&str>) -> Self {
        Self {
            path: path.map(PathBuf::from),
        }
    }
}

impl ReportSink for LocalSink {
    fn write(&self, content: &str) -> Result<()> {
        match &self.path {
            Some(path) => {
                let write_error = |source| MatchError::WriteError {
                    target: path.display().to_string(),
                    source,
                };
                if let Some(parent) = Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).map_err(write_error)?;
                    }
                }
                fs::write(path, content).map_err(write_error)?;
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(content.as_bytes())
                    .and_then(|_| stdout.flush())
                    .map_err(|source| MatchError::WriteError {
                        target: "stdout".to_string(),
                        source,
                    })?;
            }
        }
        Ok(())
    }
}
