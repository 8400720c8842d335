use chrono::{NaiveDate, NaiveDateTime};
use reading_aggregator::{
    FilterKind, ProfileStore, Reading, ReadingLog, StoreError, UserId,
    store::{load_chart, load_history, memory::MemoryProfileStore},
};

fn at(d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn fetch_unknown_user_is_not_found() {
    let store = MemoryProfileStore::default();
    let err = store.fetch(&UserId::new("ghost")).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref u) if u.as_str() == "ghost"));
}

#[tokio::test]
async fn append_requires_profile_and_valid_reading() {
    let store = MemoryProfileStore::default();
    let user = UserId::new("u1");

    let err = store.append(&user, Reading::new(5.0, at(1, 8))).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    assert!(store.create_profile(&user).await.unwrap());
    assert!(!store.create_profile(&user).await.unwrap());

    let err = store.append(&user, Reading::new(-3.0, at(1, 8))).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidReading(_)));
    assert!(store.fetch(&user).await.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_preserves_insertion_order_and_history_sorts() {
    let store = MemoryProfileStore::default();
    let user = UserId::new("u2");
    store.create_profile(&user).await.unwrap();
    for (g, t) in [(5.0, at(2, 8)), (9.0, at(5, 8)), (7.0, at(3, 8))] {
        store.append(&user, Reading::new(g, t)).await.unwrap();
    }

    let raw: Vec<f64> = store.fetch(&user).await.unwrap().iter().map(|r| r.glucose_level).collect();
    assert_eq!(raw, [5.0, 9.0, 7.0]);

    let history: Vec<f64> = load_history(&store, &user)
        .await
        .unwrap()
        .iter()
        .map(|r| r.glucose_level)
        .collect();
    assert_eq!(history, [9.0, 7.0, 5.0]);
}

#[tokio::test]
async fn load_chart_uses_fetched_snapshot() {
    let user = UserId::new("u3");
    let log = ReadingLog::from_readings(vec![
        Reading::new(6.0, at(29, 7)),
        Reading::new(4.0, at(1, 23)),
    ]);
    let store = MemoryProfileStore::with_profiles([(user.clone(), log)]);

    let series = load_chart(&store, &user, FilterKind::Month, at(15, 12)).await.unwrap();
    assert_eq!(series.window.bucket_domain(), 1..=29);
    let buckets: Vec<u32> = series.points.iter().map(|p| p.bucket).collect();
    assert_eq!(buckets, [29, 1]);

    let err = load_chart(&store, &UserId::new("nobody"), FilterKind::Day, at(1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}
