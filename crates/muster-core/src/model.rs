use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Result;

/// One roster entry. Supplied by the caller, never synthesized here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub username: String,
}

impl Member {
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
        }
    }
}

/// Rank name → ordered member list, as delivered by the caller.
///
/// The map preserves the caller's rank insertion order for round-tripping, but layout
/// always walks ranks in taxonomy order. A rank that is absent and a rank mapped to an
/// empty list are equivalent: neither contributes anything to layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    pub ranks: IndexMap<String, Vec<Member>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn insert(&mut self, rank: impl Into<String>, members: Vec<Member>) {
        self.ranks.insert(rank.into(), members);
    }

    /// Members of `rank`, or an empty slice when the rank is absent.
    pub fn members_of(&self, rank: &str) -> &[Member] {
        self.ranks.get(rank).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn total_members(&self) -> usize {
        self.ranks.values().map(Vec::len).sum()
    }

    /// True when no rank has any member at all.
    pub fn is_empty(&self) -> bool {
        self.ranks.values().all(Vec::is_empty)
    }

    /// Rank names present in the roster but unknown to `contains`, sorted for stable output.
    pub fn unknown_ranks(&self, contains: impl Fn(&str) -> bool) -> Vec<String> {
        let mut out: Vec<String> = self
            .ranks
            .iter()
            .filter(|(rank, members)| !members.is_empty() && !contains(rank))
            .map(|(rank, _)| rank.clone())
            .collect();
        out.sort();
        out
    }
}

/// Injected header/footer text. The engine never samples a wall clock; callers format one
/// instant of their choosing through [`RenderMeta::new`] (or supply the strings directly).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderMeta {
    pub total_members: usize,
    pub updated_at: String,
    pub generated_on: String,
}

impl RenderMeta {
    pub fn new(total_members: usize, now: DateTime<Utc>) -> Self {
        Self {
            total_members,
            updated_at: now.format("%d/%m/%Y %H:%M").to_string(),
            generated_on: now.format("%d/%m/%Y").to_string(),
        }
    }

    pub fn for_roster(roster: &Roster, now: DateTime<Utc>) -> Self {
        Self::new(roster.total_members(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn roster_treats_absent_and_empty_ranks_alike() {
        let mut roster = Roster::new();
        roster.insert("Dagger", vec![]);
        assert!(roster.members_of("Dagger").is_empty());
        assert!(roster.members_of("Spectre").is_empty());
        assert!(roster.is_empty());
        assert_eq!(roster.total_members(), 0);
    }

    #[test]
    fn roster_json_round_trip_preserves_member_order() {
        let text = r#"{"Spectre":[{"name":"Ada","username":"ada"},{"name":"Bo","username":"bo"}]}"#;
        let roster = Roster::from_json_str(text).unwrap();
        let members = roster.members_of("Spectre");
        assert_eq!(members[0].username, "ada");
        assert_eq!(members[1].username, "bo");
        assert_eq!(roster.total_members(), 2);
    }

    #[test]
    fn render_meta_formats_injected_instant() {
        let now = Utc.with_ymd_and_hms(2025, 3, 9, 21, 5, 0).unwrap();
        let meta = RenderMeta::new(7, now);
        assert_eq!(meta.updated_at, "09/03/2025 21:05");
        assert_eq!(meta.generated_on, "09/03/2025");
        assert_eq!(meta.total_members, 7);
    }
}
