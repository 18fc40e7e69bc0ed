//! Explore screen: browse, facet filters, and the mood query.
//!
//! The catalog is fetched once into memory; the query and filters are then
//! evaluated purely by the search kernel against the loaded entries. A read
//! failure degrades to an empty catalog with a logged error; the platform
//! handle being absent degrades the same way.

use crate::catalog::{self, StayEntry, TripEntry};
use crate::search::{self, DurationBucket, FacetFilters};
use std::sync::Arc;
use wayfare_core::{async_effect, Effect, Reducer, SmallVec};
use wayfare_platform::PlatformApi;

/// Explore screen state.
#[derive(Clone, Debug, Default)]
pub struct ExploreState {
    /// Free-text mood query
    pub query: String,
    /// Explicit dropdown filters
    pub filters: FacetFilters,
    /// Loaded trips, normalized and published-only
    pub trips: Vec<TripEntry>,
    /// Loaded stays, normalized and published-only
    pub stays: Vec<StayEntry>,
    /// A fetch is in flight
    pub loading: bool,
}

impl ExploreState {
    /// Trips passing the current filters and mood query.
    #[must_use]
    pub fn filtered_trips(&self) -> Vec<&TripEntry> {
        self.trips
            .iter()
            .filter(|trip| search::matches(&trip.facets(), &self.filters, &self.query))
            .collect()
    }

    /// Stays passing the current filters and mood query.
    #[must_use]
    pub fn filtered_stays(&self) -> Vec<&StayEntry> {
        self.stays
            .iter()
            .filter(|stay| search::matches(&stay.facets(), &self.filters, &self.query))
            .collect()
    }
}

/// Every input to the explore screen.
#[derive(Clone, Debug)]
pub enum ExploreAction {
    /// Fetch the catalog
    Refresh,
    /// Catalog fetch finished
    CatalogLoaded {
        /// Normalized trips
        trips: Vec<TripEntry>,
        /// Normalized stays
        stays: Vec<StayEntry>,
    },
    /// Catalog fetch failed; degrade to empty
    LoadFailed {
        /// Platform error text, for the log
        message: String,
    },
    /// The mood query changed
    QueryChanged(String),
    /// The region dropdown changed
    RegionSelected(Option<String>),
    /// The terrain dropdown changed
    TerrainSelected(Option<String>),
    /// The duration dropdown changed
    DurationSelected(Option<DurationBucket>),
    /// Reset filters and query to defaults
    ClearFilters,
}

/// Dependencies of the explore screen.
#[derive(Clone)]
pub struct ExploreEnvironment {
    /// Platform handle; `None` degrades every fetch to empty
    pub platform: Option<Arc<dyn PlatformApi>>,
}

impl ExploreEnvironment {
    /// Creates a new `ExploreEnvironment`
    #[must_use]
    pub const fn new(platform: Option<Arc<dyn PlatformApi>>) -> Self {
        Self { platform }
    }
}

/// Reducer for the explore screen.
#[derive(Clone, Debug, Default)]
pub struct ExploreReducer;

impl ExploreReducer {
    /// Creates a new `ExploreReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ExploreReducer {
    type State = ExploreState;
    type Action = ExploreAction;
    type Environment = ExploreEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ExploreAction::Refresh => {
                let Some(platform) = env.platform.clone() else {
                    // Feature unavailable: show nothing, skip the fetch.
                    state.trips.clear();
                    state.stays.clear();
                    state.loading = false;
                    return SmallVec::new();
                };

                state.loading = true;
                let effect = async_effect! {
                    let trips = platform.list_trips().await;
                    let stays = platform.list_stays().await;
                    match (trips, stays) {
                        (Ok(trips), Ok(stays)) => Some(ExploreAction::CatalogLoaded {
                            trips: trips.into_iter().filter_map(catalog::normalize_trip).collect(),
                            stays: stays.into_iter().filter_map(catalog::normalize_stay).collect(),
                        }),
                        (Err(err), _) | (_, Err(err)) => Some(ExploreAction::LoadFailed {
                            message: err.to_string(),
                        }),
                    }
                };
                wayfare_core::smallvec![effect]
            }

            ExploreAction::CatalogLoaded { trips, stays } => {
                state.trips = trips;
                state.stays = stays;
                state.loading = false;
                SmallVec::new()
            }

            ExploreAction::LoadFailed { message } => {
                tracing::error!(error = %message, "Catalog fetch failed, showing empty results");
                state.trips.clear();
                state.stays.clear();
                state.loading = false;
                SmallVec::new()
            }

            ExploreAction::QueryChanged(query) => {
                state.query = query;
                SmallVec::new()
            }

            ExploreAction::RegionSelected(region) => {
                state.filters.region = region;
                SmallVec::new()
            }

            ExploreAction::TerrainSelected(terrain) => {
                state.filters.terrain = terrain;
                SmallVec::new()
            }

            ExploreAction::DurationSelected(duration) => {
                state.filters.duration = duration;
                SmallVec::new()
            }

            ExploreAction::ClearFilters => {
                state.query.clear();
                state.filters = FacetFilters::default();
                SmallVec::new()
            }
        }
    }
}
