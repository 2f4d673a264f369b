use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crm_server::config::Config;

static DB_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A running test server instance with a dedicated throwaway database file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    pub client: Client,
    pub db_path: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Create a customer with the required fields, return its JSON.
    pub async fn create_customer(&self, first: &str, last: &str, email: &str) -> Value {
        let (body, status) = self
            .post(
                "/api/customers",
                &json!({ "first_name": first, "last_name": last, "email": email }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create customer failed: {body}");
        body
    }

    /// Attach a note to a customer, return its JSON.
    pub async fn create_note(&self, customer_id: i64, content: &str) -> Value {
        let (body, status) = self
            .post(
                &format!("/api/customers/{customer_id}/notes"),
                &json!({ "content": content }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create note failed: {body}");
        body
    }
}

/// Boot the app against a fresh database file on an ephemeral port.
pub async fn spawn_app() -> TestApp {
    let db_path = std::env::temp_dir().join(format!(
        "crm-test-{}-{}.db",
        std::process::id(),
        DB_COUNTER.fetch_add(1, Ordering::SeqCst)
    ));

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("failed to open test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let config = Config {
        database_url: format!("sqlite:{}", db_path.display()),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        debug: false,
        log_level: "info".to_string(),
    };

    let app = crm_server::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server crashed");
    });

    TestApp {
        addr,
        pool,
        client: Client::new(),
        db_path,
    }
}

/// Close the pool and remove the database file.
pub async fn cleanup(app: TestApp) {
    app.pool.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let mut path = app.db_path.clone().into_os_string();
        path.push(suffix);
        let _ = std::fs::remove_file(path);
    }
}
