use std::sync::Arc;

use auth::JwtHandler;
use auth::TokenIssuer;
use identity_service::identity::ports::CredentialStore;
use identity_service::identity::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::inbound::http::router::AppState;
use identity_service::inbound::http::session::SessionCodec;
use identity_service::seed::seed_users;
use identity_service::store::MemoryCredentialStore;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ACCESS_TTL_SECS: i64 = 600;
pub const REFRESH_TTL_SECS: i64 = 3600;
pub const SESSION_KEY: &str = "test-session-encryption-key";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub store: Arc<MemoryCredentialStore>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryCredentialStore::new());
        seed_users(store.as_ref())
            .await
            .expect("Failed to seed users");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let dyn_store: Arc<dyn CredentialStore> = store.clone();
        let issuer = TokenIssuer::new(JWT_SECRET, ACCESS_TTL_SECS, REFRESH_TTL_SECS);
        let service = Arc::new(AuthService::new(dyn_store, issuer));
        let jwt = Arc::new(JwtHandler::new(JWT_SECRET));
        let sessions = SessionCodec::new(SESSION_KEY, false);

        let router = create_router(AppState {
            service,
            jwt,
            sessions,
        });

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let api_client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build api client");

        let jwt_handler = JwtHandler::new(JWT_SECRET);

        Self {
            address,
            store,
            api_client,
            jwt_handler,
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Sign in as a seeded user and return the parsed response body.
    pub async fn sign_in(&self, username: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/auth/signin")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        response
            .json()
            .await
            .expect("Failed to parse sign-in response")
    }
}
