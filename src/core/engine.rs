use crate::core::matcher::Matcher;
use crate::core::report::{MatchReport, PreferenceDump};
use crate::core::stability;
use crate::domain::model::{Group, LoadedGroups};
use crate::domain::ports::{ConfigProvider, PreferenceSource};
use crate::utils::error::{MatchError, Result};

pub struct MatchEngine<S: PreferenceSource, C: ConfigProvider> {
    source: S,
    config: C,
}

impl<S: PreferenceSource, C: ConfigProvider> MatchEngine<S, C> {
    pub fn new(source: S, config: C) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn run(&self) -> Result<MatchReport> {
        tracing::info!("Loading preferences from {}", self.config.input_path());
        let loaded = self.source.load()?;
        if loaded.skipped_lines > 0 {
            tracing::warn!("{} input lines were skipped", loaded.skipped_lines);
        }
        if loaded.second.kind.is_empty() {
            tracing::warn!("Input has fewer than two agent types; nothing can be matched");
        }

        let (mut proposers, mut receivers) = select_sides(loaded, self.config.proposer())?;
        tracing::info!(
            "Matching {} {} (proposing) with {} {}",
            proposers.len(),
            proposers.kind,
            receivers.len(),
            receivers.kind
        );

        let snapshot = (self.config.verify_stability() || self.config.show_preferences())
            .then(|| [proposers.clone(), receivers.clone()]);

        let outcome = Matcher::new(&mut proposers, &mut receivers).run();
        tracing::info!(
            "Matched {} pairs ({} proposals, {} displacements, {} pruned entries)",
            outcome.matches.len(),
            outcome.stats.proposals,
            outcome.stats.displacements,
            outcome.stats.pruned
        );

        let mut report = MatchReport::new(&proposers, &receivers, outcome.matches, outcome.stats);

        if let Some(before) = snapshot {
            if self.config.verify_stability() {
                let blocking =
                    stability::find_blocking_pairs(&before[0], &before[1], &report.matches);
                if blocking.is_empty() {
                    tracing::info!("Stability check passed");
                } else {
                    for pair in &blocking {
                        tracing::warn!("Blocking pair: {} / {}", pair.proposer, pair.receiver);
                    }
                }
                report.blocking_pairs = Some(blocking);
            }
            if self.config.show_preferences() {
                report.preferences = Some(PreferenceDump {
                    before,
                    after: [proposers, receivers],
                });
            }
        }

        Ok(report)
    }
}

/// Splits the loaded groups into (proposers, receivers).
///
/// Without an explicit proposer type the first type in the input proposes.
pub fn select_sides(loaded: LoadedGroups, proposer: Option<&str>) -> Result<(Group, Group)> {
    match proposer {
        None => Ok((loaded.first, loaded.second)),
        Some(kind) if !kind.is_empty() && kind == loaded.first.kind => {
            Ok((loaded.first, loaded.second))
        }
        Some(kind) if !kind.is_empty() && kind == loaded.second.kind => {
            Ok((loaded.second, loaded.first))
        }
        Some(kind) => Err(MatchError::UnknownGroupType {
            kind: kind.to_string(),
            available: loaded.kinds().join(", "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::parse_preferences;

    #[test]
    fn test_select_sides_defaults_to_first_type() {
        let loaded = parse_preferences("man A X\nwoman X A");
        let (proposers, receivers) = select_sides(loaded, None).unwrap();
        assert_eq!(proposers.kind, "man");
        assert_eq!(receivers.kind, "woman");
    }

    #[test]
    fn test_select_sides_swaps_on_request() {
        let loaded = parse_preferences("man A X\nwoman X A");
        let (proposers, receivers) = select_sides(loaded, Some("woman")).unwrap();
        assert_eq!(proposers.kind, "woman");
        assert_eq!(receivers.kind, "man");
    }

    #[test]
    fn test_select_sides_rejects_unknown_type() {
        let loaded = parse_preferences("man A X\nwoman X A");
        let err = select_sides(loaded, Some("robot")).unwrap_err();
        match err {
            MatchError::UnknownGroupType { kind, available } => {
                assert_eq!(kind, "robot");
                assert_eq!(available, "man, woman");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
