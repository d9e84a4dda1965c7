use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth_api::domain::user::service::UserService;
use auth_api::inbound::http::router::create_router;
use auth_api::outbound::repositories::InMemoryUserRepository;

const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by the in-memory
/// repository.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// Handler sharing the server's secret, for minting and inspecting
    /// tokens in tests.
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(user_repository));
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));

        let router = create_router(user_service, authenticator, None);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return nothing; the API never echoes the
    /// created record.
    pub async fn register_user(&self, name: &str, email: &str, password: &str) {
        let response = self
            .post("/auth/register")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
                "confirmPassword": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"].as_str().expect("Missing token").to_string()
    }

    /// Extract the subject user id from a token minted by the server.
    pub fn user_id_from_token(&self, token: &str) -> String {
        let claims: auth::Claims = self
            .jwt_handler
            .decode(token)
            .expect("Failed to decode token");
        claims.subject().expect("Token has no subject").to_string()
    }
}
