use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::name::ProfileName;

/// Metadata kept for every profile in `profiles.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProfileInfo {
    #[serde(default)]
    pub description: String,
    pub created: DateTime<Utc>,
    pub last_used: DateTime<Utc>,
}

impl ProfileInfo {
    pub fn new(description: impl Into<String>, now: DateTime<Utc>) -> Self {
        ProfileInfo {
            description: description.into(),
            created: now,
            last_used: now,
        }
    }
}

/// Index of profile name to [`ProfileInfo`].
///
/// The index is not tied to the credential files on disk; entries can exist
/// without a credential file and the other way round.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Metadata {
    profiles: BTreeMap<String, ProfileInfo>,
}

impl Metadata {
    pub fn get(&self, name: &str) -> Option<&ProfileInfo> {
        self.profiles.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Record a freshly captured profile. An existing entry keeps its
    /// `created` timestamp.
    pub fn record_add(&mut self, name: &ProfileName, description: &str, now: DateTime<Utc>) {
        self.profiles
            .entry(name.to_string())
            .and_modify(|info| {
                info.description = description.to_string();
                info.last_used = now;
            })
            .or_insert_with(|| ProfileInfo::new(description, now));
    }

    /// Mark a profile as used, creating its entry if the index had lost it.
    pub fn touch(&mut self, name: &ProfileName, now: DateTime<Utc>) {
        self.profiles
            .entry(name.to_string())
            .and_modify(|info| info.last_used = now)
            .or_insert_with(|| ProfileInfo::new("", now));
    }

    pub fn remove(&mut self, name: &str) -> Option<ProfileInfo> {
        self.profiles.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ProfileInfo)> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
