//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use drive_api::{AppState, build_router};
use drive_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, RateLimitConfig, ServerConfig,
    StorageConfig, WorkerConfig,
};
use drive_database::DatabasePool;

/// Test application context.
pub struct TestApp {
    /// The router for making in-process requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub pool: PgPool,
    /// Wired services, for driving scheduled work directly.
    pub state: AppState,
}

impl TestApp {
    /// Connects to `TEST_DATABASE_URL`, runs migrations, and wipes all
    /// tables. Returns `None` when the variable is unset so suites skip
    /// cleanly on machines without a database.
    pub async fn new() -> Option<Self> {
        let url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("TEST_DATABASE_URL not set, skipping");
                return None;
            }
        };

        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url,
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 5,
                idle_timeout_seconds: 60,
            },
            auth: AuthConfig::default(),
            storage: StorageConfig {
                provider: "mock".into(),
                ..StorageConfig::default()
            },
            rate_limit: RateLimitConfig {
                enabled: false,
                ..RateLimitConfig::default()
            },
            worker: WorkerConfig::default(),
            logging: LoggingConfig::default(),
        };

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        drive_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        Self::clean_database(db.pool()).await;

        let store =
            drive_storage::build_object_store(&config.storage).expect("Failed to init storage");

        let pool = db.into_pool();
        let state = AppState::new(Arc::new(config), pool.clone(), store);
        let router = build_router(state.clone());

        Some(Self {
            router,
            pool,
            state,
        })
    }

    /// Delete all rows, children before parents.
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "recent_items",
            "stars",
            "link_shares",
            "shares",
            "files",
            "folders",
            "users",
        ];
        for table in &tables {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Register an account and return its ID and access token.
    pub async fn register(&self, email: &str, name: &str, password: &str) -> (Uuid, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "email": email,
                    "name": name,
                    "password": password,
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Registration failed: {:?}",
            response.body
        );

        let data = &response.body["data"];
        let id = data["user"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No user id in register response");
        let token = data["accessToken"]
            .as_str()
            .expect("No accessToken in register response")
            .to_string();
        (id, token)
    }

    /// Init and complete an upload, returning the file ID. The mock store
    /// reports every key at 1024 bytes, so that is the final size.
    pub async fn upload_file(&self, token: &str, name: &str, folder_id: Option<Uuid>) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/files/init",
                Some(serde_json::json!({
                    "name": name,
                    "mimeType": "text/plain",
                    "sizeBytes": 1024,
                    "folderId": folder_id,
                })),
                Some(token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Upload init failed: {:?}",
            response.body
        );
        let file_id = response.body["data"]["file"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No file id in init response");

        let response = self
            .request(
                "POST",
                "/api/files/complete",
                Some(serde_json::json!({ "fileId": file_id })),
                Some(token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Upload complete failed: {:?}",
            response.body
        );
        file_id
    }

    /// Create a folder and return its ID.
    pub async fn create_folder(&self, token: &str, name: &str, parent_id: Option<Uuid>) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "parentId": parent_id })),
                Some(token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Folder creation failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No folder id in create response")
    }

    /// Make an in-process HTTP request.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}

impl TestResponse {
    /// The machine-readable error code, if the response carries one.
    pub fn error_code(&self) -> Option<&str> {
        self.body["error"]["code"].as_str()
    }
}
