use crate::utils::error::{MatchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An agent's name plus its candidates, most preferred first.
///
/// The list never holds the same candidate twice: `add` keeps the earliest
/// (highest ranked) occurrence and ignores later ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceList {
    name: String,
    prefs: Vec<String>,
}

impl PreferenceList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefs: Vec::new(),
        }
    }

    /// Builds a list through `add`, so duplicates in `prefs` are dropped.
    pub fn with_prefs<I, T>(name: impl Into<String>, prefs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut list = Self::new(name);
        for pref in prefs {
            list.add(pref);
        }
        list
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn list(&self) -> &[String] {
        &self.prefs
    }

    pub fn get(&self, index: usize) -> Result<&str> {
        self.prefs
            .get(index)
            .map(String::as_str)
            .ok_or(MatchError::IndexOutOfRange {
                index,
                len: self.prefs.len(),
            })
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.prefs.iter().position(|p| p == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Appends `name` unless it is already listed. Returns whether it was added.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            tracing::info!(
                "{} already contains preference {}, skipping duplicate",
                self.name,
                name
            );
            return false;
        }
        self.prefs.push(name);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(index) => {
                self.prefs.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.prefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefs.is_empty()
    }
}

/// One side of the market, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub kind: String,
    pub members: Vec<PreferenceList>,
}

impl Group {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            members: Vec::new(),
        }
    }

    pub fn with_members(kind: impl Into<String>, members: Vec<PreferenceList>) -> Self {
        Self {
            kind: kind.into(),
            members,
        }
    }

    pub fn push(&mut self, member: PreferenceList) {
        self.members.push(member);
    }

    /// First member called `name`, by linear scan.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|m| m.name() == name)
    }

    pub fn by_name(&self, name: &str) -> Option<&PreferenceList> {
        self.find_by_name(name).and_then(|i| self.members.get(i))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PreferenceList> {
        self.members.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(PreferenceList::name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Receiver name to the name of its currently accepted proposer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSet(BTreeMap<String, String>);

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        receiver: impl Into<String>,
        proposer: impl Into<String>,
    ) -> Option<String> {
        self.0.insert(receiver.into(), proposer.into())
    }

    pub fn remove(&mut self, receiver: &str) -> Option<String> {
        self.0.remove(receiver)
    }

    pub fn proposer_for(&self, receiver: &str) -> Option<&str> {
        self.0.get(receiver).map(String::as_str)
    }

    pub fn receiver_for(&self, proposer: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, p)| p.as_str() == proposer)
            .map(|(r, _)| r.as_str())
    }

    pub fn contains_receiver(&self, receiver: &str) -> bool {
        self.0.contains_key(receiver)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(r, p)| (r.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<R: Into<String>, P: Into<String>> FromIterator<(R, P)> for MatchSet {
    fn from_iter<I: IntoIterator<Item = (R, P)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(r, p)| (r.into(), p.into()))
                .collect(),
        )
    }
}

/// The two groups read from an input source, in the order their types first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedGroups {
    pub first: Group,
    pub second: Group,
    pub skipped_lines: usize,
}

impl LoadedGroups {
    pub fn kinds(&self) -> Vec<&str> {
        [self.first.kind.as_str(), self.second.kind.as_str()]
            .into_iter()
            .filter(|k| !k.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_add_rejects_duplicates() {
        let mut list = PreferenceList::new("Alice");
        assert!(list.add("X"));
        assert!(list.add("Y"));
        assert!(!list.add("X"));
        assert!(!list.add(String::from("Y")));

        assert_eq!(list.list(), ["X", "Y"]);
        assert_eq!(list.len(), 2);
    }

    proptest! {
        #[test]
        fn test_add_keeps_first_occurrence_order(names in prop::collection::vec("[a-f]", 0..24)) {
            let mut list = PreferenceList::new("Alice");
            let mut expected: Vec<String> = Vec::new();
            for name in &names {
                let added = list.add(name.as_str());
                prop_assert_eq!(added, !expected.contains(name));
                if added {
                    expected.push(name.clone());
                }
            }
            prop_assert_eq!(list.list(), expected.as_slice());

            let distinct: HashSet<&String> = list.list().iter().collect();
            prop_assert_eq!(distinct.len(), list.len());

            let before = list.list().to_vec();
            for name in &names {
                prop_assert!(!list.add(name.as_str()));
            }
            prop_assert_eq!(list.list(), before.as_slice());
        }
    }

    #[test]
    fn test_with_prefs_keeps_highest_rank() {
        let list = PreferenceList::with_prefs("Bob", ["Y", "X", "Y", "Z", "X"]);
        assert_eq!(list.list(), ["Y", "X", "Z"]);
    }

    #[test]
    fn test_get_and_index_of() {
        let list = PreferenceList::with_prefs("Alice", ["X", "Y"]);
        assert_eq!(list.get(1).unwrap(), "Y");
        assert!(matches!(
            list.get(2),
            Err(MatchError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(list.index_of("X"), Some(0));
        assert_eq!(list.index_of("Q"), None);
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let mut list = PreferenceList::with_prefs("Alice", ["X", "Y", "Z"]);
        assert!(list.remove("Y"));
        assert!(!list.remove("Y"));
        assert!(!list.remove("Q"));
        assert_eq!(list.list(), ["X", "Z"]);
        assert_eq!(list.name(), "Alice");
    }

    #[test]
    fn test_find_by_name_returns_first_match() {
        let group = Group::with_members(
            "man",
            vec![
                PreferenceList::with_prefs("A", ["X"]),
                PreferenceList::with_prefs("B", ["Y"]),
                PreferenceList::with_prefs("A", ["Z"]),
            ],
        );
        assert_eq!(group.find_by_name("A"), Some(0));
        assert_eq!(group.find_by_name("B"), Some(1));
        assert_eq!(group.find_by_name("C"), None);
        assert_eq!(group.by_name("A").unwrap().list(), ["X"]);
    }

    #[test]
    fn test_match_set_lookups() {
        let mut matches = MatchSet::new();
        matches.insert("X", "Alice");
        matches.insert("Y", "Bob");

        assert_eq!(matches.proposer_for("X"), Some("Alice"));
        assert_eq!(matches.receiver_for("Bob"), Some("Y"));
        assert_eq!(matches.remove("X"), Some("Alice".to_string()));
        assert!(!matches.contains_receiver("X"));
        assert_eq!(matches.len(), 1);

        let json = serde_json::to_string(&matches).unwrap();
        assert_eq!(json, r#"{"Y":"Bob"}"#);
    }
}
