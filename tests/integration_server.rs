//! End-to-end tests for the HTTP upload service
//!
//! Each test binds a real listener on an ephemeral loopback port and talks to
//! it with a blocking HTTP client on the blocking thread pool.

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use vision_screening::config::ServeConfig;
use vision_screening::constants::HEADER_CAPTIONS;
use vision_screening::server::{RecordStore, router, serve_with_shutdown};

const ROW: &str = "2017-12-20T10:15:00+01:00;1001;Doe;Jane;2012-04-01;ID-7;\
Springfield Elementary;555-0100;-0.5;-0.25;180;5.1;0.25;-1.0;90;5.3;2.5;58.5;3;0;";

const ROW_AS_RENDERED: &str = "2017-12-20T10:15:00+01:00;1001;Doe;Jane;2012-04-01;ID-7;\
Springfield Elementary;555-0100;-0.5;-0.25;180;5.1;0.25;-1;90;5.3;2.5;58.5;3;0;";

struct TestServer {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<vision_screening::Result<()>>,
}

impl TestServer {
    async fn start(config: ServeConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(RecordStore::new(), &config);
        let (stop, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve_with_shutdown(listener, app, async move {
            let _ = stopped.await;
        }));
        Self { addr, stop, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn shutdown(self) {
        let _ = self.stop.send(());
        self.handle.await.unwrap().unwrap();
    }
}

fn export(rows: &[&str]) -> String {
    let mut text = HEADER_CAPTIONS.join(";");
    text.push_str(";\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

/// POST `body` and return the status code and response text
async fn post(url: String, body: String) -> (u16, String) {
    tokio::task::spawn_blocking(move || {
        match ureq::post(&url)
            .set("Content-Type", "text/csv")
            .send_string(&body)
        {
            Ok(response) => (response.status(), response.into_string().unwrap()),
            Err(ureq::Error::Status(code, response)) => (code, response.into_string().unwrap()),
            Err(e) => panic!("request failed: {e}"),
        }
    })
    .await
    .unwrap()
}

async fn get(url: String) -> (u16, String, String) {
    tokio::task::spawn_blocking(move || {
        let response = ureq::get(&url).call().unwrap();
        let content_type = response.header("Content-Type").unwrap_or_default().to_string();
        (response.status(), content_type, response.into_string().unwrap())
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_upload_then_render() {
    let server = TestServer::start(ServeConfig::default()).await;

    let (status, body) = post(server.url("/v1/camera/upload"), export(&[ROW, ROW])).await;
    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["message"].as_str().unwrap().contains("2 records received"));

    let (status, content_type, body) = get(server.url("/data")).await;
    assert_eq!(status, 200);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, format!("{ROW_AS_RENDERED}\n{ROW_AS_RENDERED}\n"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_rejected_upload_stores_nothing() {
    let server = TestServer::start(ServeConfig::default()).await;

    let bad_row = ROW.replace(";3;0;", ";7;0;");
    let (status, body) = post(server.url("/v1/camera/upload"), export(&[ROW, &bad_row])).await;
    assert_eq!(status, 500);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["code"], 24);
    assert!(json["error"].as_str().unwrap().contains("line 3"));

    let (_, _, body) = get(server.url("/data")).await;
    assert!(body.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_uploads_accumulate() {
    let server = TestServer::start(ServeConfig::default()).await;

    post(server.url("/v1/camera/upload"), export(&[ROW])).await;
    post(server.url("/v1/camera/upload"), export(&[])).await;
    let (status, body) = post(server.url("/v1/camera/upload"), export(&[ROW])).await;
    assert_eq!(status, 200);
    assert!(body.contains("1 records received"));

    let (_, _, body) = get(server.url("/data")).await;
    assert_eq!(body.lines().count(), 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_index_and_health() {
    let server = TestServer::start(ServeConfig::default()).await;

    let (status, _, body) = get(server.url("/")).await;
    assert_eq!(status, 200);
    assert_eq!(body, "Hello world");

    let (status, _, body) = get(server.url("/healthz")).await;
    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["ok"], true);

    server.shutdown().await;
}

#[tokio::test]
async fn test_assets_are_served() {
    let assets = tempfile::TempDir::new().unwrap();
    std::fs::write(assets.path().join("hello.txt"), "static content").unwrap();

    let config = ServeConfig {
        assets_dir: Some(assets.path().to_path_buf()),
        ..ServeConfig::default()
    };
    let server = TestServer::start(config).await;

    let (status, _, body) = get(server.url("/assets/hello.txt")).await;
    assert_eq!(status, 200);
    assert_eq!(body, "static content");

    server.shutdown().await;
}

#[tokio::test]
async fn test_oversized_upload_is_refused() {
    let config = ServeConfig {
        max_body_bytes: 64,
        ..ServeConfig::default()
    };
    let server = TestServer::start(config).await;

    let (status, _) = post(server.url("/v1/camera/upload"), export(&[ROW])).await;
    assert_eq!(status, 413);

    server.shutdown().await;
}
