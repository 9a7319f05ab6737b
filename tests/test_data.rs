use std::io::Write;

use matgrid::data::DatasetMetadata;
use matgrid::types::{ApiKey, DatasetId, SiteUrl};
use matgrid::MatgridClient;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

fn client_for(server: &ServerGuard) -> MatgridClient {
    let url = SiteUrl::try_from(format!("{}/api/", server.url())).unwrap();
    MatgridClient::new(url, &ApiKey::new("test-key".to_string())).unwrap()
}

#[tokio::test]
async fn test_create_dataset() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/datasets")
        .match_body(Matcher::PartialJson(json!({
            "name": "band gaps",
            "public": true
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {
                    "id": 42,
                    "name": "band gaps",
                    "public": true,
                    "created_at": "2026-01-05T12:00:00Z"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    let client = client_for(&server);

    let dataset = client
        .data()
        .create_dataset(&DatasetMetadata::new().name("band gaps").public(true))
        .await
        .unwrap();
    assert_eq!(dataset.id, DatasetId(42));
    assert_eq!(dataset.name.as_deref(), Some("band gaps"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_dataset_sends_only_set_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/datasets/42")
        .match_body(Matcher::JsonString(
            r#"{"description": "updated"}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"id": 42, "description": "updated"}}"#)
        .create_async()
        .await;
    let client = client_for(&server);

    let dataset = client
        .data()
        .update_dataset(DatasetId(42), &DatasetMetadata::new().description("updated"))
        .await
        .unwrap();
    assert_eq!(dataset.description.as_deref(), Some("updated"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_dataset_version() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/v1/datasets/42/create_dataset_version")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"number": 2}}"#)
        .create_async()
        .await;
    let client = client_for(&server);

    let version = client
        .data()
        .create_dataset_version(DatasetId(42))
        .await
        .unwrap();
    assert_eq!(version.number, 2);
}

#[tokio::test]
async fn test_upload_file() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/datasets/42/files")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"file_path": "inputs/measurements.csv"}}"#)
        .create_async()
        .await;
    let client = client_for(&server);

    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("measurements.csv");
    {
        let mut file = std::fs::File::create(&local).unwrap();
        writeln!(file, "formula,band_gap").unwrap();
        writeln!(file, "CoSi,0.2").unwrap();
    }

    let uploaded = client
        .data()
        .upload_file(DatasetId(42), &local, "inputs/measurements.csv")
        .await
        .unwrap();
    assert_eq!(uploaded.file_path, "inputs/measurements.csv");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_dataset_files() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/datasets/42/files")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {
                    "files": [
                        {"path": "inputs/measurements.csv",
                         "url": "https://files.example.org/a",
                         "updated_at": "2026-01-05T12:00:00Z"},
                        {"path": "inputs/reference.cif"}
                    ]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    let client = client_for(&server);

    let files = client.data().get_dataset_files(DatasetId(42)).await.unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].path, "inputs/measurements.csv");
    assert!(files[1].url.is_none());
}

#[tokio::test]
async fn test_get_pif() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/datasets/42/pif/000496A8")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"uid": "000496A8", "chemicalFormula": "C22H15NSSi"}"#)
        .create_async()
        .await;
    let client = client_for(&server);

    let pif = client.data().get_pif(DatasetId(42), "000496A8").await.unwrap();
    assert_eq!(pif["chemicalFormula"], "C22H15NSSi");
}
