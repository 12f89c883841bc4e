//! On-disk behaviour of the location store.

use std::collections::HashSet;

use locbase_store::{Preferences, Store};
use locbase_types::Coordinate;
use proptest::prelude::*;

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("locations.db");

    {
        let store = Store::open(&path);
        store.initialize().await.unwrap();
        store.insert(Coordinate::new(1.0, 2.0)).await.unwrap();
        store.insert(Coordinate::new(3.0, 4.0)).await.unwrap();
    }

    let store = Store::open(&path);
    store.initialize().await.unwrap();
    let records = store.select_all().await.unwrap();

    assert_eq!(records.len(), 2);
    let ids: HashSet<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(records.iter().any(|r| r.coordinate() == Coordinate::new(1.0, 2.0)));
    assert!(records.iter().any(|r| r.coordinate() == Coordinate::new(3.0, 4.0)));

    store.delete_all().await.unwrap();
    drop(store);

    let store = Store::open(&path);
    assert!(store.select_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_constructing_store_does_not_create_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locations.db");

    let store = Store::open(&path);
    assert_eq!(store.path(), Some(path.as_path()));
    assert!(!path.exists());

    store.initialize().await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_dark_mode_toggled_twice_restores_value() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = Preferences::open(dir.path().join("preferences.json"));

    let original = prefs.dark_mode().await.unwrap();
    prefs.set_dark_mode(!original).await.unwrap();
    let toggled = prefs.dark_mode().await.unwrap();
    prefs.set_dark_mode(!toggled).await.unwrap();

    assert_eq!(prefs.dark_mode().await.unwrap(), original);
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_loaded_set_equals_inserted_set(
        coords in prop::collection::vec((-90.0f64..90.0, -180.0f64..180.0), 0..20)
    ) {
        let loaded = runtime().block_on(async {
            let store = Store::open_in_memory();
            store.initialize().await.unwrap();
            for (lat, lon) in &coords {
                store.insert(Coordinate::new(*lat, *lon)).await.unwrap();
            }
            store.select_all().await.unwrap()
        });

        prop_assert_eq!(loaded.len(), coords.len());

        // Adding 0.0 folds -0.0 into 0.0, which SQLite does not distinguish.
        let mut expected: Vec<(u64, u64)> = coords
            .iter()
            .map(|(lat, lon)| ((lat + 0.0).to_bits(), (lon + 0.0).to_bits()))
            .collect();
        let mut actual: Vec<(u64, u64)> = loaded
            .iter()
            .map(|r| ((r.latitude + 0.0).to_bits(), (r.longitude + 0.0).to_bits()))
            .collect();
        expected.sort_unstable();
        actual.sort_unstable();
        prop_assert_eq!(actual, expected);
    }
}
