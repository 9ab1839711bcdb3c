use crate::domain::model::{Group, LoadedGroups, PreferenceList};
use crate::utils::error::Result;
use std::io::BufRead;

/// Parses preference records of the form `<type> <name> <pref1> <pref2> ...`.
///
/// The first two distinct type tokens become the two groups; lines of any
/// other type, and lines with only a type token, are logged and skipped.
pub fn parse_preferences(input: &str) -> LoadedGroups {
    let mut builder = GroupBuilder::default();
    for (index, line) in input.lines().enumerate() {
        builder.push_line(index + 1, line);
    }
    builder.finish()
}

pub fn load_reader<R: BufRead>(reader: R) -> Result<LoadedGroups> {
    let mut builder = GroupBuilder::default();
    for (index, line) in reader.lines().enumerate() {
        builder.push_line(index + 1, &line?);
    }
    Ok(builder.finish())
}

#[derive(Default)]
struct GroupBuilder {
    first: Option<Group>,
    second: Option<Group>,
    skipped_lines: usize,
}

impl GroupBuilder {
    fn push_line(&mut self, line_number: usize, line: &str) {
        let mut tokens = line.split_whitespace();
        let Some(kind) = tokens.next() else {
            return;
        };
        let Some(name) = tokens.next() else {
            tracing::warn!("Line {}: too short, skipping", line_number);
            self.skipped_lines += 1;
            return;
        };

        let Some(group) = self.group_for(kind) else {
            tracing::warn!("Line {}: type {} unrecognized, skipping", line_number, kind);
            self.skipped_lines += 1;
            return;
        };

        if group.find_by_name(name).is_some() {
            tracing::warn!(
                "Line {}: {} {} already loaded, skipping duplicate record",
                line_number,
                kind,
                name
            );
            self.skipped_lines += 1;
            return;
        }

        let prefs = PreferenceList::with_prefs(name, tokens);
        tracing::trace!("Loaded {} {} with {} preferences", kind, name, prefs.len());
        group.push(prefs);
    }

    // An empty slot is claimed by the first type that reaches it.
    fn group_for(&mut self, kind: &str) -> Option<&mut Group> {
        let first = self.first.get_or_insert_with(|| Group::new(kind));
        if first.kind == kind {
            return Some(first);
        }
        let second = self.second.get_or_insert_with(|| Group::new(kind));
        if second.kind == kind {
            return Some(second);
        }
        None
    }

    fn finish(self) -> LoadedGroups {
        let loaded = LoadedGroups {
            first: self.first.unwrap_or_default(),
            second: self.second.unwrap_or_default(),
            skipped_lines: self.skipped_lines,
        };
        tracing::debug!(
            "Loaded {} {} and {} {} ({} lines skipped)",
            loaded.first.len(),
            loaded.first.kind,
            loaded.second.len(),
            loaded.second.kind,
            loaded.skipped_lines
        );
        loaded
    }
}
