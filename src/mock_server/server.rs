//! Mock GitHub API server.
//!
//! Provides an axum-based HTTP server that simulates the GitHub Issues API.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers::{self, error_response};
use super::state::{MockState, RecordedRequest, SharedState};

/// A mock GitHub API server for testing.
///
/// The server runs in the background and keeps its state across requests,
/// so a workflow's effects can be inspected afterwards.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `GithubClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows inspecting or modifying the mock data during a test.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Default state: the fixture repository plus an open issue scenario.
    pub fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for issue in scenario.issues {
            state.insert_issue(&scenario.owner, &scenario.repo, issue);
        }

        for user in scenario.assignable {
            state = state.with_assignable(&scenario.owner, &scenario.repo, user);
        }

        state
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: SharedState) -> Router {
        Router::new()
            // Issue routes
            .route(
                "/repos/:owner/:repo/issues",
                get(handlers::list_issues).post(handlers::create_issue),
            )
            .route(
                "/repos/:owner/:repo/issues/:number",
                get(handlers::get_issue).patch(handlers::update_issue),
            )
            // Label routes
            .route(
                "/repos/:owner/:repo/issues/:number/labels",
                get(handlers::list_labels)
                    .post(handlers::add_labels)
                    .put(handlers::set_labels)
                    .delete(handlers::remove_all_labels),
            )
            .route(
                "/repos/:owner/:repo/issues/:number/labels/:name",
                delete(handlers::remove_label),
            )
            // Assignee routes
            .route(
                "/repos/:owner/:repo/issues/:number/assignees",
                post(handlers::add_assignees).delete(handlers::remove_assignees),
            )
            .route("/repos/:owner/:repo/assignees", get(handlers::list_assignees))
            .layer(middleware::from_fn_with_state(state.clone(), gatekeeper))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Records every request, then applies rate limiting and token checks.
async fn gatekeeper(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    {
        let mut state = state.write().await;
        state.requests.push(RecordedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
        });

        if let Some(secs) = state.rate_limit_retry_after {
            return (
                StatusCode::TOO_MANY_REQUESTS,
                [("retry-after", secs.to_string())],
                Json(serde_json::json!({"message": "API rate limit exceeded"})),
            )
                .into_response();
        }

        if let Some(token) = &state.required_token {
            let expected = format!("Bearer {token}");
            let presented = request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok());
            if presented != Some(expected.as_str()) {
                return error_response(StatusCode::UNAUTHORIZED, "Bad credentials");
            }
        }
    }

    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
