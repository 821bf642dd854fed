mod error;
mod followers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use followers_common::error::FollowersResult;
use followers_common::types::ServiceInfo;
use followers_config::{init_tracing, AppConfig};
use followers_db::follows::neo4j_repository::Neo4jFollowsRepository;
use followers_db::follows::repositories::FollowsRepository;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use followers::service::FollowersService;

#[derive(Clone)]
pub struct AppState {
    pub followers: FollowersService,
    pub info: Arc<ServiceInfo>,
}

impl AppState {
    pub fn new(repo: Arc<dyn FollowsRepository>) -> Self {
        Self {
            followers: FollowersService::new(repo),
            info: Arc::new(ServiceInfo::new("followers-api")),
        }
    }
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.followers.check_store().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok", "uptime_secs": state.info.uptime_secs() })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "graph store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "unavailable", "error": e.to_string() })),
            )
        }
    }
}

async fn info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.info.as_ref().clone())
}

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .merge(followers::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn connect_store(config: &AppConfig) -> FollowersResult<Neo4jFollowsRepository> {
    let graph = followers_db::connect_graph(config).await?;
    let repo = Neo4jFollowsRepository::new(graph);
    repo.verify_connectivity().await?;
    tracing::info!(uri = %config.neo4j_uri, "graph store reachable");
    Ok(repo)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("failed to load config");
    init_tracing(&config.log_level);
    tracing::info!(service = "followers-api", "starting");

    let repo = tokio::time::timeout(config.startup_timeout(), connect_store(&config))
        .await
        .expect("timed out connecting to graph store")
        .expect("failed to connect to graph store");

    let app = build_router(AppState::new(Arc::new(repo)));
    let addr: SocketAddr = config.bind_addr().parse().expect("invalid bind address");

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
    tracing::info!("server stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use followers_common::error::{FollowersError, FollowersResult};
    use followers_db::follows::memory_repository::InMemoryFollowsRepository;
    use followers_db::follows::models::{Follower, Person};
    use tower::ServiceExt;

    fn person(user_id: i64, name: &str) -> Person {
        Person {
            id: user_id + 1000,
            user_id,
            name: name.to_string(),
            surname: "Doe".to_string(),
            picture: format!("https://img.example/{user_id}.png"),
            bio: "bio".to_string(),
            quote: "quote".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    fn test_app() -> Router {
        let repo = InMemoryFollowsRepository::with_people([
            person(1, "Ana"),
            person(2, "Bo"),
            person(3, "Cy"),
        ])
        .expect("valid people");
        build_router(AppState::new(Arc::new(repo)))
    }

    /// Store whose every call fails as an unreachable database would.
    struct DownRepo;

    #[async_trait::async_trait]
    impl FollowsRepository for DownRepo {
        async fn get_profile(&self, _user_id: &str) -> FollowersResult<Person> {
            Err(FollowersError::Database("connection refused".into()))
        }
        async fn get_followers(&self, _user_id: &str) -> FollowersResult<Vec<Follower>> {
            Err(FollowersError::Database("connection refused".into()))
        }
        async fn get_following(&self, _user_id: &str) -> FollowersResult<Vec<Follower>> {
            Err(FollowersError::Database("connection refused".into()))
        }
        async fn get_recommended(&self, _user_id: &str) -> FollowersResult<Vec<Follower>> {
            Err(FollowersError::Database("connection refused".into()))
        }
        async fn follow(&self, _followee_id: &str, _follower_id: &str) -> FollowersResult<()> {
            Err(FollowersError::Database("connection refused".into()))
        }
        async fn unfollow(&self, _followee_id: &str, _follower_id: &str) -> FollowersResult<()> {
            Err(FollowersError::Database("connection refused".into()))
        }
        async fn is_following(&self, _user_id: &str, _other_id: &str) -> FollowersResult<bool> {
            Err(FollowersError::Database("connection refused".into()))
        }
        async fn verify_connectivity(&self) -> FollowersResult<()> {
            Err(FollowersError::Database("connection refused".into()))
        }
    }

    async fn send(app: &Router, method: Method, uri: &str) -> axum::http::Response<Body> {
        app.clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_body(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn user_ids(body: &serde_json::Value) -> Vec<i64> {
        body["followers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["userId"].as_i64().unwrap())
            .collect()
    }

    // ── Health / Info ───────────────────────────────────────────────

    #[tokio::test]
    async fn health_returns_ok() {
        let app = test_app();
        let resp = send(&app, Method::GET, "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_body(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn health_reports_unreachable_store() {
        let app = build_router(AppState::new(Arc::new(DownRepo)));
        let resp = send(&app, Method::GET, "/health").await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn info_is_stable_across_calls() {
        let app = test_app();
        let first = read_body(send(&app, Method::GET, "/info").await).await;
        let second = read_body(send(&app, Method::GET, "/info").await).await;
        assert_eq!(first["name"], "followers-api");
        assert_eq!(first["instance_id"], second["instance_id"]);
    }

    // ── Profile ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn profile_returns_person_json() {
        let app = test_app();
        let resp = send(&app, Method::GET, "/followers/1/profile").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["userId"], 1);
        assert_eq!(body["id"], 1001);
        assert_eq!(body["name"], "Ana");
        assert_eq!(body["picture"], "https://img.example/1.png");
    }

    #[tokio::test]
    async fn profile_unknown_user_returns_404() {
        let app = test_app();
        let resp = send(&app, Method::GET, "/followers/42/profile").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = read_body(resp).await;
        assert!(body["error"].as_str().unwrap().contains("42"));
    }

    #[tokio::test]
    async fn malformed_id_returns_400() {
        let app = test_app();
        for uri in [
            "/followers/abc/profile",
            "/followers/abc/followers",
            "/followers/abc/following",
            "/followers/abc/recommended",
            "/followers/1/abc/isFollowing",
        ] {
            let resp = send(&app, Method::GET, uri).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
            let body = read_body(resp).await;
            assert!(body["error"].as_str().unwrap().contains("invalid user id"));
        }

        let resp = send(&app, Method::POST, "/followers/2/xyz").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = send(&app, Method::DELETE, "/followers/xyz/1").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    // ── Follow / Unfollow ───────────────────────────────────────────

    #[tokio::test]
    async fn follow_then_unfollow_round_trip() {
        let app = test_app();

        let resp = send(&app, Method::POST, "/followers/2/1").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["message"], "Following successful");

        let body = read_body(send(&app, Method::GET, "/followers/1/following").await).await;
        assert_eq!(user_ids(&body), vec![2]);
        assert_eq!(body["count"], 1);

        let body = read_body(send(&app, Method::GET, "/followers/2/followers").await).await;
        assert_eq!(user_ids(&body), vec![1]);

        let body = read_body(send(&app, Method::GET, "/followers/1/2/isFollowing").await).await;
        assert_eq!(body["following"], true);
        assert_eq!(body["message"], "Following status: true");

        let resp = send(&app, Method::DELETE, "/followers/2/1").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_body(resp).await["message"], "Unfollowing successful");

        let body = read_body(send(&app, Method::GET, "/followers/1/following").await).await;
        assert!(user_ids(&body).is_empty());

        let body = read_body(send(&app, Method::GET, "/followers/1/2/isFollowing").await).await;
        assert_eq!(body["following"], false);
    }

    #[tokio::test]
    async fn follow_unknown_user_returns_404() {
        let app = test_app();
        let resp = send(&app, Method::POST, "/followers/9/1").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn follow_self_returns_400() {
        let app = test_app();
        let resp = send(&app, Method::POST, "/followers/1/1").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    // ── Recommendations ─────────────────────────────────────────────

    #[tokio::test]
    async fn recommended_returns_friends_of_friends() {
        let app = test_app();
        send(&app, Method::POST, "/followers/2/1").await;
        send(&app, Method::POST, "/followers/3/2").await;
        send(&app, Method::POST, "/followers/1/2").await;

        let body = read_body(send(&app, Method::GET, "/followers/1/recommended").await).await;
        assert_eq!(user_ids(&body), vec![3]);
        let first = &body["followers"][0];
        assert_eq!(first["name"], "Cy");
        assert!(first.get("picture").is_none());
    }

    #[tokio::test]
    async fn empty_lists_serialize_as_empty_arrays() {
        let app = test_app();
        let body = read_body(send(&app, Method::GET, "/followers/3/followers").await).await;
        assert_eq!(body["followers"], serde_json::json!([]));
        assert_eq!(body["count"], 0);
    }

    // ── Store failures ──────────────────────────────────────────────

    #[tokio::test]
    async fn store_failure_maps_to_500() {
        let app = build_router(AppState::new(Arc::new(DownRepo)));
        for (method, uri) in [
            (Method::GET, "/followers/1/profile"),
            (Method::GET, "/followers/1/recommended"),
            (Method::POST, "/followers/2/1"),
            (Method::DELETE, "/followers/2/1"),
        ] {
            let resp = send(&app, method, uri).await;
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            let body = read_body(resp).await;
            assert!(body["error"].as_str().unwrap().contains("database error"));
        }
    }
}
