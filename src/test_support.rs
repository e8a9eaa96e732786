//! Shared helpers for tests that talk to a mocked remote API.

use crate::config::SourceConfig;
use crate::source::SourceClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ARTISTS_JSON: &str = include_str!("../fixtures/api/artists.json");
pub const LOCATIONS_JSON: &str = include_str!("../fixtures/api/locations.json");
pub const DATES_JSON: &str = include_str!("../fixtures/api/dates.json");
pub const RELATION_JSON: &str = include_str!("../fixtures/api/relation.json");

/// Mount every fixture under `/api/...`, each expected to be hit exactly once.
pub async fn mount_fixtures(server: &MockServer) {
    for (route, body) in [
        ("/api/artists", ARTISTS_JSON),
        ("/api/locations", LOCATIONS_JSON),
        ("/api/dates", DATES_JSON),
        ("/api/relation", RELATION_JSON),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(body, "application/json"),
            )
            .expect(1)
            .mount(server)
            .await;
    }
}

/// A client pointed at the mock server's `/api` prefix.
pub fn client_for(server: &MockServer) -> SourceClient {
    let config = SourceConfig {
        api_url: format!("{}/api", server.uri()),
        timeout_seconds: 5,
    };
    SourceClient::new(&config).expect("build source client")
}
