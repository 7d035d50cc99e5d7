use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use pinned_core::error::AppError;
use pinned_core::testutil::{MockFetcher, make_record, repo_page, sample_profile};
use pinned_core::traits::RepoCache;

use crate::common::{PROFILE_URL, setup_test_app};

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn populated_fetcher() -> MockFetcher {
    MockFetcher::new()
        .with_page(PROFILE_URL, &sample_profile())
        .with_page(
            "https://github.com/alice/widget",
            &repo_page("https://widget.example"),
        )
        .with_page(
            "https://github.com/alice/gadget",
            &repo_page("https://gadget.example"),
        )
}

#[tokio::test]
async fn health_returns_200() {
    let (app, _cache) = setup_test_app(MockFetcher::new());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn missing_username_returns_400() {
    let (app, _cache) = setup_test_app(MockFetcher::new());

    let response = app
        .oneshot(Request::get("/api/repos").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Username is required");
}

#[tokio::test]
async fn empty_username_returns_400() {
    let (app, _cache) = setup_test_app(MockFetcher::new());

    let response = app
        .oneshot(
            Request::get("/api/repos?username=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn returns_pinned_repos_as_json() {
    let (app, _cache) = setup_test_app(populated_fetcher());

    let response = app
        .oneshot(
            Request::get("/api/repos?username=alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let repos = json.as_array().unwrap();
    assert_eq!(repos.len(), 2);

    assert_eq!(repos[0]["owner"], "alice");
    assert_eq!(repos[0]["repo"], "widget");
    assert_eq!(repos[0]["link"], "https://github.com/alice/widget");
    assert_eq!(
        repos[0]["image"],
        "https://opengraph.githubassets.com/1/alice/widget"
    );
    assert_eq!(repos[0]["website"], "https://widget.example");
    assert_eq!(repos[0]["description"], "A tiny widget");
    assert_eq!(repos[0]["language"], "Rust");
    assert_eq!(repos[0]["languageColor"], "#dea584");
    assert_eq!(repos[0]["stars"], 42);
    assert_eq!(repos[0]["forks"], 7);

    assert_eq!(repos[1]["repo"], "gadget");
    assert_eq!(repos[1]["language"], "Go");
}

#[tokio::test]
async fn success_populates_cache() {
    let (app, cache) = setup_test_app(populated_fetcher());

    let response = app
        .oneshot(
            Request::get("/api/repos?username=alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(cache.has("alice"));
    let entry = cache.get("alice").await.unwrap();
    assert_eq!(entry.len(), 2);
}

#[tokio::test]
async fn cache_hit_skips_network() {
    let fetcher = MockFetcher::new();
    let (app, cache) = setup_test_app(fetcher.clone());
    let cached = vec![make_record("alice", "widget")];
    cache.set("alice".to_string(), cached.clone()).await;

    let response = app
        .oneshot(
            Request::get("/api/repos?username=alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["repo"], "widget");
    // The cached sequence is served verbatim with zero upstream fetches.
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn refresh_bypasses_cache_and_overwrites_entry() {
    let fetcher = populated_fetcher();
    let (app, cache) = setup_test_app(fetcher.clone());
    cache
        .set("alice".to_string(), vec![make_record("alice", "stale")])
        .await;

    let response = app
        .oneshot(
            Request::get("/api/repos?username=alice&refresh=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(fetcher.call_count() > 0);

    let entry = cache.get("alice").await.unwrap();
    assert_eq!(entry.len(), 2);
    assert_eq!(entry[0].repo, "widget");
}

#[tokio::test]
async fn unknown_user_returns_404() {
    let fetcher = MockFetcher::new().with_error(
        PROFILE_URL,
        AppError::Upstream {
            status: 404,
            url: PROFILE_URL.to_string(),
        },
    );
    let (app, cache) = setup_test_app(fetcher);

    let response = app
        .oneshot(
            Request::get("/api/repos?username=alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "User not found");
    assert!(!cache.has("alice"));
}

#[tokio::test]
async fn no_pinned_items_returns_404_and_leaves_cache_unmodified() {
    let fetcher =
        MockFetcher::new().with_page(PROFILE_URL, "<html><body>no pins</body></html>");
    let (app, cache) = setup_test_app(fetcher);

    let response = app
        .oneshot(
            Request::get("/api/repos?username=alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No pinned repositories found");
    assert!(!cache.has("alice"));
}

#[tokio::test]
async fn upstream_rate_limit_returns_429() {
    let fetcher = MockFetcher::new().with_error(
        PROFILE_URL,
        AppError::Upstream {
            status: 429,
            url: PROFILE_URL.to_string(),
        },
    );
    let (app, _cache) = setup_test_app(fetcher);

    let response = app
        .oneshot(
            Request::get("/api/repos?username=alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Rate limit exceeded. Please try again later.");
}

#[tokio::test]
async fn transport_failure_returns_500_with_message() {
    let fetcher =
        MockFetcher::new().with_error(PROFILE_URL, AppError::Network("connection refused".into()));
    let (app, _cache) = setup_test_app(fetcher);

    let response = app
        .oneshot(
            Request::get("/api/repos?username=alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "network error: connection refused");
}

#[tokio::test]
async fn responses_carry_permissive_cors_header() {
    let (app, _cache) = setup_test_app(MockFetcher::new());

    let response = app
        .oneshot(
            Request::get("/health")
                .header("origin", "https://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
}
