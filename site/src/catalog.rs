//! Catalog normalization.
//!
//! The platform's catalog relations carry two coexisting naming conventions
//! (`name` vs `title`, `price` vs `cost`). Rather than propagating that
//! ambiguity through every consumer, raw rows are normalized exactly once at
//! this boundary into canonical entries; everything downstream (booking flow,
//! search, API responses) sees only the canonical shape. Precedence is
//! `name` over `title` and `price` over `cost`; rows that are not published,
//! are explicitly hidden, or lack a usable name are dropped at ingestion.

use crate::search::EntryFacets;
use crate::types::{Money, StayId, TripId};
use serde::{Deserialize, Serialize};
use wayfare_platform::{DateBatchRow, RoomTypeRow, StayRow, TripRow};

/// A dated departure of a trip with its fixed spot counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBatch {
    /// Departure label, e.g. "12 Dec"
    pub start_label: String,
    /// Return label, e.g. "18 Dec"
    pub end_label: String,
    /// Remaining spots; a batch at zero is not selectable
    pub spots_remaining: u32,
}

impl From<DateBatchRow> for DateBatch {
    fn from(row: DateBatchRow) -> Self {
        Self {
            start_label: row.start_label,
            end_label: row.end_label,
            spots_remaining: row.spots_remaining,
        }
    }
}

/// A room category of a stay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    /// Room name
    pub name: String,
    /// Price per night
    pub price_per_night: Money,
    /// Marketing copy
    pub description: Option<String>,
}

impl From<RoomTypeRow> for RoomType {
    fn from(row: RoomTypeRow) -> Self {
        Self {
            name: row.name,
            price_per_night: Money::from_rupees(row.price_per_night),
            description: row.description,
        }
    }
}

/// A published trip, normalized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripEntry {
    /// Trip id
    pub id: TripId,
    /// Display name
    pub name: String,
    /// Tagline
    pub tagline: Option<String>,
    /// Region facet, lowercase
    pub region: Option<String>,
    /// Terrain facet, lowercase
    pub terrain: Option<String>,
    /// Duration in days
    pub duration_days: Option<u32>,
    /// Flat per-traveller price
    pub price: Money,
    /// Maximum group size
    pub group_size: Option<u32>,
    /// Dated departures
    pub batches: Vec<DateBatch>,
}

impl TripEntry {
    /// The facets the search kernel filters on.
    #[must_use]
    pub fn facets(&self) -> EntryFacets<'_> {
        EntryFacets {
            region: self.region.as_deref(),
            terrain: self.terrain.as_deref(),
            duration_days: self.duration_days,
            group_size: self.group_size,
        }
    }
}

/// A published stay, normalized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayEntry {
    /// Stay id
    pub id: StayId,
    /// Display name
    pub name: String,
    /// Tagline
    pub tagline: Option<String>,
    /// Region facet, lowercase
    pub region: Option<String>,
    /// Terrain facet, lowercase
    pub terrain: Option<String>,
    /// Base nightly price
    pub price: Money,
    /// Room categories; the first is the booking-flow default
    pub rooms: Vec<RoomType>,
}

impl StayEntry {
    /// The facets the search kernel filters on.
    ///
    /// Stays carry no duration or group size; a mood constraint on either
    /// excludes them (hard-filter semantics).
    #[must_use]
    pub fn facets(&self) -> EntryFacets<'_> {
        EntryFacets {
            region: self.region.as_deref(),
            terrain: self.terrain.as_deref(),
            duration_days: None,
            group_size: None,
        }
    }
}

/// Whether a raw row is browsable: published and not explicitly hidden.
fn is_browsable(status: Option<&str>, is_visible: Option<bool>) -> bool {
    status == Some("published") && is_visible != Some(false)
}

fn normalize_facet(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// Normalize a raw trip row, dropping non-browsable or nameless rows.
#[must_use]
pub fn normalize_trip(row: TripRow) -> Option<TripEntry> {
    if !is_browsable(row.status.as_deref(), row.is_visible) {
        return None;
    }

    let name = row.name.or(row.title).map(|n| n.trim().to_string())?;
    if name.is_empty() {
        return None;
    }

    Some(TripEntry {
        id: TripId::from_uuid(row.id),
        name,
        tagline: row.tagline,
        region: normalize_facet(row.region),
        terrain: normalize_facet(row.terrain),
        duration_days: row.duration_days,
        price: Money::from_rupees(row.price.or(row.cost).unwrap_or(0)),
        group_size: row.group_size,
        batches: row.batches.into_iter().map(DateBatch::from).collect(),
    })
}

/// Normalize a raw stay row, dropping non-browsable or nameless rows.
#[must_use]
pub fn normalize_stay(row: StayRow) -> Option<StayEntry> {
    if !is_browsable(row.status.as_deref(), row.is_visible) {
        return None;
    }

    let name = row.name.or(row.title).map(|n| n.trim().to_string())?;
    if name.is_empty() {
        return None;
    }

    Some(StayEntry {
        id: StayId::from_uuid(row.id),
        name,
        tagline: row.tagline,
        region: normalize_facet(row.region),
        terrain: normalize_facet(row.terrain),
        price: Money::from_rupees(row.price.or(row.cost).unwrap_or(0)),
        rooms: row.rooms.into_iter().map(RoomType::from).collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use uuid::Uuid;

    fn raw_trip() -> TripRow {
        TripRow {
            id: Uuid::new_v4(),
            name: Some("Spiti Valley Circuit".to_string()),
            status: Some("published".to_string()),
            price: Some(28999),
            ..TripRow::default()
        }
    }

    #[test]
    fn name_wins_over_title() {
        let mut row = raw_trip();
        row.title = Some("Old Spiti Title".to_string());
        let entry = normalize_trip(row).unwrap();
        assert_eq!(entry.name, "Spiti Valley Circuit");
    }

    #[test]
    fn title_fills_in_for_missing_name() {
        let mut row = raw_trip();
        row.name = None;
        row.title = Some("Spiti (legacy)".to_string());
        let entry = normalize_trip(row).unwrap();
        assert_eq!(entry.name, "Spiti (legacy)");
    }

    #[test]
    fn price_wins_over_cost() {
        let mut row = raw_trip();
        row.cost = Some(19999);
        let entry = normalize_trip(row).unwrap();
        assert_eq!(entry.price, Money::from_rupees(28999));

        let mut row = raw_trip();
        row.price = None;
        row.cost = Some(19999);
        let entry = normalize_trip(row).unwrap();
        assert_eq!(entry.price, Money::from_rupees(19999));
    }

    #[test]
    fn draft_and_hidden_rows_are_dropped() {
        let mut row = raw_trip();
        row.status = Some("draft".to_string());
        assert!(normalize_trip(row).is_none());

        let mut row = raw_trip();
        row.is_visible = Some(false);
        assert!(normalize_trip(row).is_none());

        let mut row = raw_trip();
        row.name = None;
        row.title = None;
        assert!(normalize_trip(row).is_none());
    }

    #[test]
    fn facets_are_lowercased() {
        let mut row = raw_trip();
        row.terrain = Some("Mountains".to_string());
        row.region = Some(" Himachal ".to_string());
        let entry = normalize_trip(row).unwrap();
        assert_eq!(entry.terrain.as_deref(), Some("mountains"));
        assert_eq!(entry.region.as_deref(), Some("himachal"));
    }

    #[test]
    fn stay_rooms_carry_money_prices() {
        let row = StayRow {
            id: Uuid::new_v4(),
            name: Some("Pine Cottage".to_string()),
            status: Some("published".to_string()),
            price: Some(599),
            rooms: vec![RoomTypeRow {
                name: "Deluxe".to_string(),
                price_per_night: 599,
                description: None,
            }],
            ..StayRow::default()
        };
        let entry = normalize_stay(row).unwrap();
        assert_eq!(entry.rooms[0].price_per_night, Money::from_rupees(599));
    }
}
