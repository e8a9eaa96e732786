//! Data models for the artist aggregator.
//!
//! The `Source*` types mirror the four remote collections as they arrive on
//! the wire. [`MergedEntity`] and [`Aggregate`] are what the rest of the
//! application sees once the collections have been correlated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Location name to the ordered list of concert dates played there.
pub type DatesLocations = BTreeMap<String, Vec<String>>;

/// One artist profile from the `artists` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceArtist {
    /// Identifier sent by the API. Correlation ignores it and uses position.
    #[serde(default)]
    pub id: i64,
    pub image: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
    pub creation_date: i32,
    /// First release date, kept verbatim (`DD-MM-YYYY` upstream).
    pub first_album: String,
    /// Link to this artist's locations resource.
    #[serde(default)]
    pub locations: String,
    /// Link to this artist's dates resource.
    #[serde(default)]
    pub concert_dates: String,
    /// Link to this artist's relation resource.
    #[serde(default)]
    pub relations: String,
}

/// One entry of the `locations` index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLocations {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub locations: Vec<String>,
    /// Collection-level grouping reference (a link to the dates resource).
    #[serde(default)]
    pub dates: String,
}

/// One entry of the `dates` index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDates {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub dates: Vec<String>,
}

/// One entry of the `relation` index: an artist's full tour schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRelations {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub dates_locations: DatesLocations,
}

/// `{"index": [...]}` envelope used by every collection except `artists`.
#[derive(Debug, Clone, Deserialize)]
pub struct Index<T> {
    pub index: Vec<T>,
}

/// A fully-assembled artist, the only entity exposed outside the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedEntity {
    /// 1-based position in fetch order.
    pub id: usize,
    pub image: String,
    pub name: String,
    pub members: Vec<String>,
    pub creation_date: i32,
    pub first_album: String,
    pub locations: Vec<String>,
    pub concert_dates: Vec<String>,
    pub dates_locations: DatesLocations,
}

impl MergedEntity {
    /// Number of concerts across every location in the schedule.
    pub fn concert_count(&self) -> usize {
        self.dates_locations.values().map(Vec::len).sum()
    }
}

/// The whole merged view, built once per process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aggregate {
    pub artists: Vec<MergedEntity>,
}

impl Aggregate {
    pub fn new(artists: Vec<MergedEntity>) -> Self {
        Self { artists }
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    /// Linear scan for the artist whose identifier equals `id`.
    pub fn find(&self, id: usize) -> Option<&MergedEntity> {
        self.artists.iter().find(|artist| artist.id == id)
    }
}

/// The four raw collections fetched for one build.
#[derive(Debug, Clone, Default)]
pub struct SourceBundle {
    pub artists: Vec<SourceArtist>,
    pub locations: Vec<SourceLocations>,
    pub dates: Vec<SourceDates>,
    pub relations: Vec<SourceRelations>,
}
