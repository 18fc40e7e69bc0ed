//! Mood/filter search kernel.
//!
//! Free-text queries are tokenized (lowercase, whitespace split) and each
//! token is looked up in a fixed keyword table mapping words to partial facet
//! effects: a set of acceptable terrains, a duration bucket, or a small-group
//! flag. Terrain hints union across tokens; duration and group hints are
//! single-valued with last matching token winning; unknown tokens are
//! ignored. The final predicate ANDs the explicit facet filters with every
//! accumulated mood constraint. Hard filter only — no ranking, fuzzy
//! matching, or stemming.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Acceptable group size under the small-group mood.
const SMALL_GROUP_CEILING: u32 = 10;

/// Duration boundary in days: `Short` is `<= 7`, `Long` is `> 7`.
const SHORT_TRIP_DAYS: u32 = 7;

/// Duration bucket a query or facet dropdown can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    /// Seven days or fewer
    Short,
    /// More than seven days
    Long,
}

impl DurationBucket {
    /// Whether a concrete duration falls in this bucket.
    #[must_use]
    pub const fn contains(self, days: u32) -> bool {
        match self {
            Self::Short => days <= SHORT_TRIP_DAYS,
            Self::Long => days > SHORT_TRIP_DAYS,
        }
    }

    /// Parse a dropdown value (`short` / `long`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "short" => Some(Self::Short),
            "long" => Some(Self::Long),
            _ => None,
        }
    }
}

/// The facets of one catalog entry the kernel filters on.
///
/// Borrowed view; catalog entries produce it via `facets()`. A `None` facet
/// fails any constraint on it.
#[derive(Clone, Copy, Debug)]
pub struct EntryFacets<'a> {
    /// Region, lowercase
    pub region: Option<&'a str>,
    /// Terrain, lowercase
    pub terrain: Option<&'a str>,
    /// Duration in days
    pub duration_days: Option<u32>,
    /// Maximum group size
    pub group_size: Option<u32>,
}

/// Explicit dropdown filters, independent of the free-text query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFilters {
    /// Region dropdown
    pub region: Option<String>,
    /// Terrain dropdown
    pub terrain: Option<String>,
    /// Duration dropdown
    pub duration: Option<DurationBucket>,
}

impl FacetFilters {
    fn matches(&self, entry: &EntryFacets<'_>) -> bool {
        if let Some(region) = &self.region {
            if entry.region != Some(region.as_str()) {
                return false;
            }
        }
        if let Some(terrain) = &self.terrain {
            if entry.terrain != Some(terrain.as_str()) {
                return false;
            }
        }
        if let Some(bucket) = self.duration {
            match entry.duration_days {
                Some(days) if bucket.contains(days) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Partial effect of one keyword.
enum MoodHint {
    Terrain(&'static [&'static str]),
    Duration(DurationBucket),
    SmallGroup,
}

/// The fixed keyword table. Single words only; multi-word moods come from
/// their tokens independently.
fn lookup_keyword(token: &str) -> Option<MoodHint> {
    match token {
        "mountain" | "mountains" | "peaks" | "alpine" | "himalayas" => {
            Some(MoodHint::Terrain(&["mountains"]))
        }
        "beach" | "beaches" | "coast" | "coastal" | "sea" => Some(MoodHint::Terrain(&["coast"])),
        "desert" | "dunes" => Some(MoodHint::Terrain(&["desert"])),
        "forest" | "jungle" | "woods" => Some(MoodHint::Terrain(&["forest"])),
        "river" | "valley" | "valleys" => Some(MoodHint::Terrain(&["valley"])),
        "snow" | "winter" => Some(MoodHint::Terrain(&["mountains", "valley"])),
        "short" | "quick" | "weekend" => Some(MoodHint::Duration(DurationBucket::Short)),
        "long" | "extended" | "slow" => Some(MoodHint::Duration(DurationBucket::Long)),
        "quiet" | "peaceful" | "calm" | "intimate" | "offbeat" => Some(MoodHint::SmallGroup),
        _ => None,
    }
}

/// Constraints accumulated from a free-text query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoodConstraints {
    /// Acceptable terrains; empty means unconstrained
    pub terrains: BTreeSet<&'static str>,
    /// Duration bucket, last matching token wins
    pub duration: Option<DurationBucket>,
    /// Group-size ceiling, last matching token wins
    pub group_ceiling: Option<u32>,
}

impl MoodConstraints {
    /// Accumulate constraints from a query. An empty or all-unknown query
    /// yields the default (no constraint).
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut constraints = Self::default();
        for token in query.to_lowercase().split_whitespace() {
            match lookup_keyword(token) {
                Some(MoodHint::Terrain(terrains)) => {
                    constraints.terrains.extend(terrains);
                }
                Some(MoodHint::Duration(bucket)) => {
                    constraints.duration = Some(bucket);
                }
                Some(MoodHint::SmallGroup) => {
                    constraints.group_ceiling = Some(SMALL_GROUP_CEILING);
                }
                None => {}
            }
        }
        constraints
    }

    fn matches(&self, entry: &EntryFacets<'_>) -> bool {
        if !self.terrains.is_empty() {
            match entry.terrain {
                Some(terrain) if self.terrains.contains(terrain) => {}
                _ => return false,
            }
        }
        if let Some(bucket) = self.duration {
            match entry.duration_days {
                Some(days) if bucket.contains(days) => {}
                _ => return false,
            }
        }
        if let Some(ceiling) = self.group_ceiling {
            match entry.group_size {
                Some(size) if size <= ceiling => {}
                _ => return false,
            }
        }
        true
    }
}

/// The full predicate: explicit facet filters AND, when the query is
/// non-empty, every accumulated mood constraint.
#[must_use]
pub fn matches(entry: &EntryFacets<'_>, filters: &FacetFilters, query: &str) -> bool {
    if !filters.matches(entry) {
        return false;
    }
    if query.trim().is_empty() {
        return true;
    }
    MoodConstraints::from_query(query).matches(entry)
}
