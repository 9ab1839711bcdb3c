use crate::core::matcher::MatchStats;
use crate::core::stability::BlockingPair;
use crate::domain::model::{Group, MatchSet};
use crate::domain::ports::OutputFormat;
use crate::utils::error::{MatchError, Result};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceDump {
    pub before: [Group; 2],
    pub after: [Group; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub proposer_kind: String,
    pub receiver_kind: String,
    pub matches: MatchSet,
    pub unmatched_proposers: Vec<String>,
    pub unmatched_receivers: Vec<String>,
    pub stats: MatchStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_pairs: Option<Vec<BlockingPair>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PreferenceDump>,
}

impl MatchReport {
    pub fn new(proposers: &Group, receivers: &Group, matches: MatchSet, stats: MatchStats) -> Self {
        let unmatched_proposers = proposers
            .names()
            .filter(|p| matches.receiver_for(p).is_none())
            .map(str::to_string)
            .collect();
        let unmatched_receivers = receivers
            .names()
            .filter(|r| !matches.contains_receiver(r))
            .map(str::to_string)
            .collect();

        Self {
            proposer_kind: proposers.kind.clone(),
            receiver_kind: receivers.kind.clone(),
            matches,
            unmatched_proposers,
            unmatched_receivers,
            stats,
            blocking_pairs: None,
            preferences: None,
        }
    }

    pub fn is_stable(&self) -> Option<bool> {
        self.blocking_pairs.as_ref().map(Vec::is_empty)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Csv => self.to_csv(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();

        if let Some(dump) = &self.preferences {
            out.push_str("Preferences before matching:\n");
            out.push_str(&render_groups(&dump.before));
            out.push('\n');
        }

        out.push_str("Final stable matches:\n");
        for (receiver, proposer) in self.matches.iter() {
            let _ = writeln!(out, "  {} -> {}", receiver, proposer);
        }
        if !self.unmatched_proposers.is_empty() {
            let _ = writeln!(
                out,
                "Unmatched {}: {}",
                label(&self.proposer_kind),
                self.unmatched_proposers.join(", ")
            );
        }
        if !self.unmatched_receivers.is_empty() {
            let _ = writeln!(
                out,
                "Unmatched {}: {}",
                label(&self.receiver_kind),
                self.unmatched_receivers.join(", ")
            );
        }

        if let Some(blocking) = &self.blocking_pairs {
            if blocking.is_empty() {
                out.push_str("Stability check: passed\n");
            } else {
                out.push_str("Stability check: FAILED\n");
                for pair in blocking {
                    let _ = writeln!(out, "  blocking pair {} / {}", pair.proposer, pair.receiver);
                }
            }
        }

        if let Some(dump) = &self.preferences {
            out.push('\n');
            out.push_str("Preferences after matching:\n");
            out.push_str(&render_groups(&dump.after));
        }

        out
    }

    fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["receiver", "proposer"])?;
        for (receiver, proposer) in self.matches.iter() {
            writer.write_record([receiver, proposer])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| MatchError::ProcessingError {
                message: format!("Failed to flush CSV output: {}", e),
            })?;
        String::from_utf8(bytes).map_err(|e| MatchError::ProcessingError {
            message: format!("CSV output is not UTF-8: {}", e),
        })
    }
}

/// Lists every agent of each group with its current preferences.
pub fn render_groups(groups: &[Group]) -> String {
    let mut out = String::new();
    for (index, group) in groups.iter().enumerate() {
        let _ = writeln!(out, "Group {} ({}):", index + 1, label(&group.kind));
        for member in group.iter() {
            let _ = writeln!(out, "  {}: [{}]", member.name(), member.list().join(", "));
        }
    }
    out
}

fn label(kind: &str) -> &str {
    if kind.is_empty() {
        "none"
    } else {
        kind
    }
}
