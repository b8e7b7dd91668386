//! Fetch a release from a mock catalog and file it in a local collection.

use spindle_catalog::{release_to_patch, ClientConfig, DiscogsClient};
use spindle_core::{Database, RecordStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_import_release_into_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases/249504"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 249504,
            "title": "Never Gonna Give You Up",
            "artists": [{"name": "Rick Astley", "id": 72872}],
            "year": 1987,
            "country": "UK",
            "labels": [{"name": "RCA", "catno": "PB 41447", "id": 895}],
            "formats": [{"name": "Vinyl", "qty": "1", "descriptions": ["7\"", "Single", "45 RPM"]}],
            "genres": ["Electronic", "Pop"],
            "styles": ["Synth-pop"],
            "images": [{"type": "primary", "uri": "https://i.discogs.com/rick.jpg"}],
            "identifiers": [
                {"type": "Matrix / Runout", "value": "PB 41447 A1"},
                {"type": "Matrix / Runout", "value": "PB 41447 B1"}
            ],
            "uri": "https://www.discogs.com/release/249504"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DiscogsClient::new(
        ClientConfig::default()
            .with_base_url(server.uri())
            .with_token("test-token"),
    )
    .unwrap();
    let store = RecordStore::new(Database::open_in_memory().unwrap());

    let release = client.get_release(249_504).await.unwrap();
    let record = store.create_record(release_to_patch(&release)).await.unwrap();

    assert_eq!(record.data.artist_name, "Rick Astley");
    assert_eq!(record.data.album_name, "Never Gonna Give You Up");
    assert_eq!(record.data.serial_number, "PB 41447");
    assert_eq!(record.data.matrix_runout, "PB 41447 A1 // PB 41447 B1");
    assert_eq!(record.data.year, Some(1987));
    assert_eq!(record.data.label.as_deref(), Some("RCA"));
    assert_eq!(
        record.data.format.as_deref(),
        Some("1 × Vinyl (7\", Single, 45 RPM)")
    );
    assert_eq!(record.data.discogs_id, Some(249_504));
    assert_eq!(
        record.image_url.as_deref(),
        Some("https://i.discogs.com/rick.jpg")
    );
    assert_eq!(record.created_at, record.updated_at);

    let stored = store.list_records().await.unwrap();
    assert_eq!(stored, vec![record]);
}

#[tokio::test]
async fn test_failed_fetch_leaves_collection_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "Release not found."})),
        )
        .mount(&server)
        .await;

    let client = DiscogsClient::new(
        ClientConfig::default()
            .with_base_url(server.uri())
            .with_token("test-token"),
    )
    .unwrap();
    let store = RecordStore::new(Database::open_in_memory().unwrap());

    let result = client.get_release(1).await;
    assert!(result.is_err());
    assert!(store.list_records().await.unwrap().is_empty());
}
