//! Positional correlation of the four source collections.
//!
//! The remote API carries no foreign keys between collections: element `i`
//! of every collection describes the same artist. This module turns that
//! convention into an explicit contract and assembles the merged view.

use crate::error::{AggregateError, Result};
use crate::models::{
    Aggregate, MergedEntity, SourceArtist, SourceBundle, SourceDates, SourceLocations,
    SourceRelations,
};
use tracing::debug;

/// Merge the four collections position by position.
///
/// All four slices must have the same length, otherwise nothing is merged and
/// a [`AggregateError::Correlation`] names every length. Element `i` becomes
/// the entity with identifier `i + 1`.
pub fn merge(
    artists: &[SourceArtist],
    locations: &[SourceLocations],
    dates: &[SourceDates],
    relations: &[SourceRelations],
) -> Result<Aggregate> {
    let len = artists.len();
    if locations.len() != len || dates.len() != len || relations.len() != len {
        return Err(AggregateError::Correlation {
            artists: artists.len(),
            locations: locations.len(),
            dates: dates.len(),
            relations: relations.len(),
        });
    }

    let merged: Vec<MergedEntity> = artists
        .iter()
        .zip(locations)
        .zip(dates)
        .zip(relations)
        .enumerate()
        .map(|(i, (((artist, locations), dates), relations))| MergedEntity {
            id: i + 1,
            image: artist.image.clone(),
            name: artist.name.clone(),
            members: artist.members.clone(),
            creation_date: artist.creation_date,
            first_album: artist.first_album.clone(),
            locations: locations.locations.clone(),
            concert_dates: dates.dates.clone(),
            dates_locations: relations.dates_locations.clone(),
        })
        .collect();

    debug!("Merged {} artists", merged.len());
    Ok(Aggregate::new(merged))
}

/// Merge a fetched bundle.
pub fn merge_bundle(bundle: &SourceBundle) -> Result<Aggregate> {
    merge(
        &bundle.artists,
        &bundle.locations,
        &bundle.dates,
        &bundle.relations,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DatesLocations;

    fn artist(name: &str) -> SourceArtist {
        SourceArtist {
            id: 0,
            image: format!("https://img.example/{name}.jpeg"),
            name: name.to_string(),
            members: vec![format!("{name} singer")],
            creation_date: 1990,
            first_album: "01-01-1991".to_string(),
            locations: String::new(),
            concert_dates: String::new(),
            relations: String::new(),
        }
    }

    fn locations(names: &[&str]) -> SourceLocations {
        SourceLocations {
            id: 0,
            locations: names.iter().map(|s| s.to_string()).collect(),
            dates: String::new(),
        }
    }

    fn dates(values: &[&str]) -> SourceDates {
        SourceDates {
            id: 0,
            dates: values.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn relations(location: &str, dates: &[&str]) -> SourceRelations {
        let mut dates_locations = DatesLocations::new();
        dates_locations.insert(
            location.to_string(),
            dates.iter().map(|s| s.to_string()).collect(),
        );
        SourceRelations {
            id: 0,
            dates_locations,
        }
    }

    fn bundle_of(n: usize) -> SourceBundle {
        SourceBundle {
            artists: (0..n).map(|i| artist(&format!("band{i}"))).collect(),
            locations: (0..n).map(|_| locations(&["paris-france"])).collect(),
            dates: (0..n).map(|_| dates(&["01-02-2020"])).collect(),
            relations: (0..n)
                .map(|_| relations("paris-france", &["01-02-2020"]))
                .collect(),
        }
    }

    #[test]
    fn test_queen_scenario() {
        let mut queen = artist("Queen");
        queen.members = vec!["Freddie".to_string(), "Brian".to_string()];
        queen.creation_date = 1970;
        queen.first_album = "1973-07-13".to_string();

        let aggregate = merge(
            &[queen],
            &[locations(&["london", "tokyo"])],
            &[dates(&["2020-01-01"])],
            &[relations("london", &["2020-01-01"])],
        )
        .unwrap();

        assert_eq!(aggregate.len(), 1);
        let entity = &aggregate.artists[0];
        assert_eq!(entity.id, 1);
        assert_eq!(entity.name, "Queen");
        assert_eq!(entity.members, vec!["Freddie", "Brian"]);
        assert_eq!(entity.creation_date, 1970);
        assert_eq!(entity.first_album, "1973-07-13");
        assert_eq!(entity.locations, vec!["london", "tokyo"]);
        assert_eq!(entity.concert_dates, vec!["2020-01-01"]);
        assert_eq!(
            entity.dates_locations.get("london"),
            Some(&vec!["2020-01-01".to_string()])
        );
        assert!(aggregate.find(2).is_none());
    }

    #[test]
    fn test_identifiers_are_dense_and_ordered() {
        for n in [0, 1, 5, 52] {
            let aggregate = merge_bundle(&bundle_of(n)).unwrap();
            let ids: Vec<usize> = aggregate.artists.iter().map(|a| a.id).collect();
            assert_eq!(ids, (1..=n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_position_drives_alignment() {
        let bundle = SourceBundle {
            artists: vec![artist("first"), artist("second")],
            locations: vec![locations(&["a"]), locations(&["b"])],
            dates: vec![dates(&["1"]), dates(&["2"])],
            relations: vec![relations("a", &["1"]), relations("b", &["2"])],
        };

        let aggregate = merge_bundle(&bundle).unwrap();
        let second = aggregate.find(2).unwrap();
        assert_eq!(second.name, "second");
        assert_eq!(second.locations, vec!["b"]);
        assert_eq!(second.concert_dates, vec!["2"]);
        assert!(second.dates_locations.contains_key("b"));
    }

    #[test]
    fn test_merge_is_deterministic() {
        let bundle = bundle_of(4);
        let first = serde_json::to_vec(&merge_bundle(&bundle).unwrap()).unwrap();
        let second = serde_json::to_vec(&merge_bundle(&bundle).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_length_mismatch_is_correlation_error() {
        let mut bundle = bundle_of(3);
        bundle.locations.truncate(2);

        let err = merge_bundle(&bundle).unwrap_err();
        match err {
            AggregateError::Correlation {
                artists,
                locations,
                dates,
                relations,
            } => {
                assert_eq!((artists, locations, dates, relations), (3, 2, 3, 3));
            }
            other => panic!("expected Correlation, got {other:?}"),
        }
    }

    #[test]
    fn test_more_relations_than_artists_is_rejected() {
        let mut bundle = bundle_of(2);
        bundle.relations.push(relations("extra", &["01-01-2021"]));

        assert!(matches!(
            merge_bundle(&bundle),
            Err(AggregateError::Correlation { relations: 3, .. })
        ));
    }
}
