//! HTTP server tests.
//!
//! Each test writes fixture documents to a temp dir, starts the server on a
//! free port in a background task, and talks to it with `reqwest`.

mod common;

use beer_catalog::config::Config;
use beer_catalog::server::run_server;
use serde_json::{json, Value};
use tempfile::TempDir;

use common::{config_toml, dead_pony, nitro, punk_ipa, write_documents};

fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

async fn wait_for_server(port: u16) {
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/health", port);
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
    }
    panic!("Server did not become ready within 5 seconds");
}

struct TestServer {
    _tmp: TempDir,
    base: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(docs: &[Value], wait_for_migration: bool) -> Self {
        let tmp = TempDir::new().unwrap();
        write_documents(tmp.path(), docs);
        let port = find_free_port();
        let bind = format!("127.0.0.1:{}", port);
        let config: Config =
            toml::from_str(&config_toml(tmp.path(), &bind, wait_for_migration)).unwrap();

        let handle = tokio::spawn(async move {
            run_server(&config).await.unwrap();
        });
        wait_for_server(port).await;

        Self {
            _tmp: tmp,
            base: format!("http://127.0.0.1:{}", port),
            handle,
        }
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = reqwest::get(format!("{}{}", self.base, path)).await.unwrap();
        let status = resp.status().as_u16();
        let body: Value = resp.json().await.unwrap();
        (status, body)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn ids(body: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn test_list_and_filters() {
    let server = TestServer::start(&[punk_ipa(), nitro(), dead_pony()], true).await;

    let (status, body) = server.get("/v2/beers").await;
    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec![1, 2, 3]);

    let (_, body) = server.get("/v2/beers?malt=Pale").await;
    assert_eq!(ids(&body), vec![1, 3]);

    let (_, body) = server.get("/v2/beers?ibu=40&food=cheese").await;
    assert_eq!(ids(&body), vec![3]);

    let (_, body) = server.get("/v2/beers?name=").await;
    assert_eq!(ids(&body), vec![1, 2, 3]);

    let (_, body) = server.get("/v2/beers?name=%27%20OR%201%3D1%20--").await;
    assert_eq!(ids(&body), Vec::<i64>::new());
}

#[tokio::test]
async fn test_list_rejects_non_numeric_ibu() {
    let server = TestServer::start(&[punk_ipa()], true).await;

    let (status, body) = server.get("/v2/beers?ibu=lots").await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "bad_request");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_empty_ibu_is_ignored() {
    let server = TestServer::start(&[punk_ipa(), nitro(), dead_pony()], true).await;

    let (status, body) = server.get("/v2/beers?ibu=").await;
    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec![1, 2, 3]);

    let (_, body) = server.get("/v2/beers?ibu=&name=punk").await;
    assert_eq!(ids(&body), vec![1]);
}

#[tokio::test]
async fn test_get_by_id() {
    let server = TestServer::start(&[punk_ipa(), nitro()], true).await;

    let (status, body) = server.get("/v2/beers/1").await;
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Punk IPA");
    assert_eq!(body["malt"], "Extra Pale");

    let (status, body) = server.get("/v2/beers/99").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "beer not found: 99");
    assert_eq!(body["code"], "not_found");

    let (status, body) = server.get("/v2/beers/abc").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "beer not found: abc");
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_food_pairing_scenario() {
    let docs = [
        json!({ "id": 1, "name": "Punk", "food_pairing": ["Pizza"] }),
        json!({ "id": 2, "name": "Nitro", "food_pairing": [] }),
    ];
    let server = TestServer::start(&docs, true).await;

    let (_, body) = server.get("/v2/beers?food=Pizza").await;
    assert_eq!(ids(&body), vec![1]);

    let (status, body) = server.get("/v2/beers/2").await;
    assert_eq!(status, 200);
    assert!(body["food_pairing"].is_null());
}

#[tokio::test]
async fn test_health_reports_migration() {
    let server = TestServer::start(&[punk_ipa(), nitro(), dead_pony()], true).await;

    let (status, body) = server.get("/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["migration"]["attempted"], 3);
    assert_eq!(body["migration"]["succeeded"], 3);
    assert_eq!(body["migration"]["failed"], 0);
}

#[tokio::test]
async fn test_background_migration_eventually_ready() {
    let server = TestServer::start(&[punk_ipa(), nitro(), dead_pony()], false).await;

    let mut ready = false;
    for _ in 0..50 {
        let (_, body) = server.get("/health").await;
        if !body["migration"].is_null() {
            ready = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
    assert!(ready, "background rebuild did not finish");

    let (status, body) = server.get("/v2/beers").await;
    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec![1, 2, 3]);
}
