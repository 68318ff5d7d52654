//! The rank taxonomy: a fixed total order of ranks, an explicit level number per rank, a
//! partition of ranks into named sub-groups, and the one rank rendered outside the
//! hierarchy ("honorary").
//!
//! The taxonomy is immutable once built. Roster keys that are not in the taxonomy are a
//! defined no-op for layout (silently excluded); configuration mistakes, by contrast, fail
//! loudly at construction.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One configured rank. `level` is a stored lookup value, never derived from the rank's
/// position, so gaps in the ladder survive any subset of present ranks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankDescriptor {
    pub name: String,
    pub level: i64,
}

/// A named cluster of ranks sharing one banner. The banner anchors at the cluster's first
/// rank in taxonomy order, regardless of the order names appear in `ranks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankGroup {
    pub label: String,
    pub ranks: Vec<String>,
}

/// Serde-friendly construction input for [`RankTaxonomy`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    pub ranks: Vec<RankDescriptor>,
    #[serde(default)]
    pub groups: Vec<RankGroup>,
    pub honorary: String,
}

#[derive(Debug, Clone)]
pub struct RankTaxonomy {
    ranks: Vec<RankDescriptor>,
    index: FxHashMap<String, usize>,
    group_label_by_head: FxHashMap<String, String>,
    honorary: String,
}

impl RankTaxonomy {
    /// Builds a validated taxonomy. Errors cover configuration mistakes only: an empty rank
    /// list, duplicate rank names, groups referencing unknown ranks, a rank claimed by two
    /// groups, or an honorary rank that is not configured.
    pub fn from_config(config: TaxonomyConfig) -> Result<Self> {
        if config.ranks.is_empty() {
            return Err(Error::EmptyTaxonomy);
        }

        let mut index = FxHashMap::default();
        for (i, rank) in config.ranks.iter().enumerate() {
            if index.insert(rank.name.clone(), i).is_some() {
                return Err(Error::DuplicateRank(rank.name.clone()));
            }
        }

        if !index.contains_key(&config.honorary) {
            return Err(Error::UnknownHonoraryRank(config.honorary));
        }

        let mut grouped: FxHashSet<&str> = FxHashSet::default();
        let mut group_label_by_head = FxHashMap::default();
        for group in &config.groups {
            let mut head: Option<usize> = None;
            for rank in &group.ranks {
                let Some(&i) = index.get(rank.as_str()) else {
                    return Err(Error::UnknownGroupRank {
                        group: group.label.clone(),
                        rank: rank.clone(),
                    });
                };
                if !grouped.insert(rank.as_str()) {
                    return Err(Error::RankInMultipleGroups(rank.clone()));
                }
                head = Some(head.map_or(i, |h: usize| h.min(i)));
            }
            if let Some(h) = head {
                group_label_by_head.insert(config.ranks[h].name.clone(), group.label.clone());
            }
        }

        Ok(Self {
            ranks: config.ranks,
            index,
            group_label_by_head,
            honorary: config.honorary,
        })
    }

    /// The taxonomy used by the RAV deployment this renderer grew out of. Note the level
    /// ladder: the honorary rank holds level 5, so the visible hierarchy runs 10..6 and
    /// then 4..0. The gap is configured, not computed.
    pub fn default_rav() -> Self {
        Self::from_config(default_rav_config())
            .unwrap_or_else(|err| unreachable!("built-in taxonomy is valid: {err}"))
    }

    /// Ranks in their fixed total order.
    pub fn ranks(&self) -> &[RankDescriptor] {
        &self.ranks
    }

    pub fn contains(&self, rank: &str) -> bool {
        self.index.contains_key(rank)
    }

    /// The configured level for `rank`. A direct lookup: a rank configured at level 4
    /// reports 4 no matter which other ranks are present.
    pub fn level_of(&self, rank: &str) -> Option<i64> {
        self.index.get(rank).map(|&i| self.ranks[i].level)
    }

    /// The sub-group label anchored at `rank`, if `rank` is the first rank of its group.
    pub fn group_label_of(&self, rank: &str) -> Option<&str> {
        self.group_label_by_head.get(rank).map(String::as_str)
    }

    pub fn honorary_rank(&self) -> &str {
        &self.honorary
    }
}

/// Construction input for [`RankTaxonomy::default_rav`], exposed so frontends can merge
/// overrides into it before building.
pub fn default_rav_config() -> TaxonomyConfig {
    let rank = |name: &str, level: i64| RankDescriptor {
        name: name.to_string(),
        level,
    };
    let group = |label: &str, ranks: &[&str]| RankGroup {
        label: label.to_string(),
        ranks: ranks.iter().map(|r| r.to_string()).collect(),
    };

    TaxonomyConfig {
        ranks: vec![
            rank("Vanguard Supreme", 10),
            rank("Phantom Leader", 9),
            rank("Phantom Regent", 8),
            rank("Night Council", 7),
            rank("Black Sigil", 6),
            rank("Honorary", 5),
            rank("Spectre", 4),
            rank("Revenant", 3),
            rank("Vantage", 2),
            rank("Dagger", 1),
            rank("Neophyte", 0),
        ],
        groups: vec![
            group(
                "Leadership",
                &["Vanguard Supreme", "Phantom Leader", "Phantom Regent"],
            ),
            group("Management Team", &["Night Council", "Black Sigil"]),
            group(
                "RAV Members",
                &["Spectre", "Revenant", "Vantage", "Dagger", "Neophyte"],
            ),
        ],
        honorary: "Honorary".to_string(),
    }
}
