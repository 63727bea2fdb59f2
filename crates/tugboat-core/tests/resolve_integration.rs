use std::cell::Cell;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tugboat_api::responses::Droplet;
use tugboat_client::{Credentials, HttpClient};
use tugboat_core::*;

struct RecordingChooser {
    pick: usize,
    offered: Cell<usize>,
}

impl RecordingChooser {
    fn new(pick: usize) -> Self {
        Self {
            pick,
            offered: Cell::new(0),
        }
    }
}

impl DropletChooser for RecordingChooser {
    fn choose(&self, candidates: &[&Droplet]) -> Result<usize> {
        self.offered.set(candidates.len());
        Ok(self.pick)
    }
}

async fn server_with_droplets() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/droplets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "droplets": [
                {"id": 1, "name": "web-frontend", "image_id": 1, "size_id": 64, "region_id": 1,
                 "ip_address": "10.0.0.1", "status": "active"},
                {"id": 2, "name": "web-backend", "image_id": 1, "size_id": 64, "region_id": 1,
                 "ip_address": "10.0.0.2", "status": "off"},
                {"id": 3, "name": "database", "image_id": 1, "size_id": 66, "region_id": 2,
                 "ip_address": "10.0.0.3", "status": "active"}
            ]
        })))
        .mount(&server)
        .await;

    server
}

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(server.uri(), Credentials::new("cid", "key")).unwrap()
}

#[tokio::test]
async fn test_resolve_by_id_uses_show() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/droplets/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "droplet": {"id": 3, "name": "database", "image_id": 1, "size_id": 66,
                        "region_id": 2, "ip_address": "10.0.0.3", "status": "active"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let chooser = RecordingChooser::new(0);
    let resolution = resolve_droplet(&client_for(&server), &DropletSelector::Id(3), &chooser)
        .await
        .unwrap();

    assert_eq!(resolution.droplet.name, "database");
    assert_eq!(chooser.offered.get(), 0);
}

#[tokio::test]
async fn test_resolve_exact_name() {
    let server = server_with_droplets().await;

    let chooser = RecordingChooser::new(0);
    let resolution = resolve_droplet(
        &client_for(&server),
        &DropletSelector::Name("web-backend".into()),
        &chooser,
    )
    .await
    .unwrap();

    assert_eq!(resolution.droplet.id, 2);
}

#[tokio::test]
async fn test_resolve_exact_name_does_not_fuzzy_match() {
    let server = server_with_droplets().await;

    let err = resolve_droplet(
        &client_for(&server),
        &DropletSelector::Name("web".into()),
        &RecordingChooser::new(0),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CoreError::DropletNotFound(ref name) if name == "web"));
}

#[tokio::test]
async fn test_resolve_unique_fuzzy_match() {
    let server = server_with_droplets().await;

    let chooser = RecordingChooser::new(0);
    let resolution = resolve_droplet(
        &client_for(&server),
        &DropletSelector::Fuzzy("DATA".into()),
        &chooser,
    )
    .await
    .unwrap();

    assert_eq!(resolution.droplet.id, 3);
    assert!(!resolution.chosen);
    assert_eq!(chooser.offered.get(), 0);
}

#[tokio::test]
async fn test_resolve_ambiguous_fuzzy_asks_chooser() {
    let server = server_with_droplets().await;

    let chooser = RecordingChooser::new(1);
    let resolution = resolve_droplet(
        &client_for(&server),
        &DropletSelector::Fuzzy("web".into()),
        &chooser,
    )
    .await
    .unwrap();

    assert_eq!(chooser.offered.get(), 2);
    assert_eq!(resolution.droplet.name, "web-backend");
    assert!(resolution.chosen);
}

#[tokio::test]
async fn test_resolve_propagates_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/droplets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ERROR",
            "error_message": "Access Denied"
        })))
        .mount(&server)
        .await;

    let err = resolve_droplet(
        &client_for(&server),
        &DropletSelector::Fuzzy("web".into()),
        &RecordingChooser::new(0),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CoreError::Client(_)));
}
