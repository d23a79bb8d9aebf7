//! Region resolver tests against a local wiremock lookup service.

use std::time::Duration;

use banwatch_lookup::{AccountLookup, LookupConfig, RegionResolver};
use banwatch_types::{LookupError, REGIONS};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_PATH: &str = "/api/account/";
const PLAYER_ID: &str = "123456789";

fn resolver_for(server: &MockServer) -> RegionResolver {
    RegionResolver::new(LookupConfig {
        base_url: format!("{}{}", server.uri(), API_PATH),
        timeout_secs: 2,
        ..LookupConfig::default()
    })
    .unwrap()
}

fn account_body(nickname: &str) -> serde_json::Value {
    json!({
        "basicInfo": {
            "nickname": nickname,
            "createAt": "1600000000",
            "lastLoginAt": "1700000000"
        }
    })
}

async fn mount_region(server: &MockServer, region: &str, response: ResponseTemplate, calls: u64) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("uid", PLAYER_ID))
        .and(query_param("region", region))
        .respond_with(response)
        .expect(calls)
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

#[tokio::test]
async fn test_stops_at_first_region_with_account() {
    let server = MockServer::start().await;
    let hit = 2;

    for (i, region) in REGIONS.iter().enumerate() {
        let (response, calls) = if i < hit {
            (ResponseTemplate::new(404), 1)
        } else if i == hit {
            (ResponseTemplate::new(200).set_body_json(account_body("Shadow")), 1)
        } else {
            (ResponseTemplate::new(404), 0)
        };
        mount_region(&server, region.code, response, calls).await;
    }

    let record = resolver_for(&server).lookup(PLAYER_ID).await.unwrap();

    assert_eq!(record.nickname, "Shadow");
    assert_eq!(record.region, REGIONS[hit].code);
    assert!(!record.banned);
    assert_eq!(record.created_at.as_deref(), Some("2020-09-13 12:26:40"));
    assert_eq!(record.last_login.as_deref(), Some("2023-11-14 22:13:20"));
    assert_eq!(request_count(&server).await, hit + 1);
}

#[tokio::test]
async fn test_all_regions_missing_is_account_not_found() {
    let server = MockServer::start().await;
    for region in REGIONS.iter() {
        mount_region(&server, region.code, ResponseTemplate::new(404), 1).await;
    }

    let result = resolver_for(&server).lookup(PLAYER_ID).await;

    assert_eq!(result, Err(LookupError::AccountNotFound));
    assert_eq!(request_count(&server).await, 13);
}

#[tokio::test]
async fn test_region_reported_by_service_wins() {
    let server = MockServer::start().await;
    let body = json!({ "basicInfo": { "nickname": "Nomad", "region": "ME" } });
    mount_region(&server, "ind", ResponseTemplate::new(200).set_body_json(body), 1).await;

    let record = resolver_for(&server).lookup(PLAYER_ID).await.unwrap();

    assert_eq!(record.region, "ME");
    assert_eq!(record.created_at_or_na(), "N/A");
}

#[tokio::test]
async fn test_missing_create_at_is_not_an_error() {
    let server = MockServer::start().await;
    let body = json!({ "basicInfo": { "nickname": "Nomad", "lastLoginAt": "1600000000" } });
    mount_region(&server, "ind", ResponseTemplate::new(200).set_body_json(body), 1).await;

    let record = resolver_for(&server).lookup(PLAYER_ID).await.unwrap();

    assert_eq!(record.created_at_or_na(), "N/A");
    assert_eq!(record.last_login_or_na(), "2020-09-13 12:26:40");
}

#[tokio::test]
async fn test_unhealthy_regions_are_skipped() {
    let server = MockServer::start().await;
    mount_region(&server, "ind", ResponseTemplate::new(500), 1).await;
    mount_region(&server, "br", ResponseTemplate::new(403), 1).await;
    mount_region(
        &server,
        "sg",
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
        1,
    )
    .await;
    mount_region(
        &server,
        "ru",
        ResponseTemplate::new(200).set_body_json(json!({ "error": "rate limited" })),
        1,
    )
    .await;
    mount_region(
        &server,
        "id",
        ResponseTemplate::new(200).set_body_json(account_body("Survivor")),
        1,
    )
    .await;

    let record = resolver_for(&server).lookup(PLAYER_ID).await.unwrap();

    assert_eq!(record.nickname, "Survivor");
    assert_eq!(record.region, "id");
    assert_eq!(request_count(&server).await, 5);
}

#[tokio::test]
async fn test_slow_region_times_out_and_scan_continues() {
    let server = MockServer::start().await;
    mount_region(
        &server,
        "ind",
        ResponseTemplate::new(200)
            .set_body_json(account_body("TooSlow"))
            .set_delay(Duration::from_secs(5)),
        1,
    )
    .await;
    mount_region(
        &server,
        "br",
        ResponseTemplate::new(200).set_body_json(account_body("Fast")),
        1,
    )
    .await;

    let resolver = RegionResolver::new(LookupConfig {
        base_url: format!("{}{}", server.uri(), API_PATH),
        timeout_secs: 1,
        ..LookupConfig::default()
    })
    .unwrap();

    let record = resolver.lookup(PLAYER_ID).await.unwrap();
    assert_eq!(record.nickname, "Fast");
}

#[tokio::test]
async fn test_unreachable_service_exhausts_regions() {
    let resolver = RegionResolver::new(LookupConfig {
        base_url: "http://127.0.0.1:1/api/account/".to_string(),
        regions: vec!["ind".to_string(), "br".to_string()],
        timeout_secs: 2,
        ..LookupConfig::default()
    })
    .unwrap();

    let result = resolver.lookup(PLAYER_ID).await;
    assert_eq!(result, Err(LookupError::AccountNotFound));
}

#[tokio::test]
async fn test_configured_region_subset_is_respected() {
    let server = MockServer::start().await;
    mount_region(&server, "bd", ResponseTemplate::new(404), 1).await;
    mount_region(&server, "pk", ResponseTemplate::new(404), 1).await;
    mount_region(&server, "ind", ResponseTemplate::new(404), 0).await;

    let resolver = RegionResolver::new(LookupConfig {
        base_url: format!("{}{}", server.uri(), API_PATH),
        regions: vec!["bd".to_string(), "pk".to_string()],
        ..LookupConfig::default()
    })
    .unwrap();

    assert_eq!(resolver.regions(), ["bd", "pk"]);
    assert_eq!(
        resolver.lookup(PLAYER_ID).await,
        Err(LookupError::AccountNotFound)
    );
    assert_eq!(request_count(&server).await, 2);
}
