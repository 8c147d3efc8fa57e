//! Page routes driven through the router with `oneshot`.

mod common;

use axum::http::StatusCode;
use common::*;
use photorio::models::category::Category;

#[tokio::test]
async fn healthz_and_readyz() {
    let pool = setup_test_db().await;
    let app = create_test_router(&pool, FakeIdentityService::with_users([]));

    let (status, body) = send_request(app.clone(), get_request("/healthz", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send_request(app, get_request("/readyz", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["sqlite"]["ok"], true);
}

#[tokio::test]
async fn home_page_search_sets_title_and_filters() {
    let pool = setup_test_db().await;
    insert_work(&pool, NewWork::new(1, "Quiet landscape", "user_a")).await;
    insert_work(&pool, NewWork::new(2, "Portrait of a dog", "user_a")).await;
    let app = create_test_router(&pool, FakeIdentityService::with_users([]));

    let (status, body) = send_request(app, get_request("/?search=landscape", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["metadata"]["title"],
        "Browse thousands of Landscape images for design inspiration | Photorio"
    );
    assert_eq!(body["metadata"]["canonical_url"], "https://photorio.example/");
    assert_eq!(body["search"], "landscape");
    assert_eq!(body["total_works"], 1);
    assert_eq!(body["page_count"], 1);
    assert_eq!(body["works"][0]["title"], "Quiet landscape");
}

#[tokio::test]
async fn home_page_ignores_unknown_category_but_titles_with_it() {
    let pool = setup_test_db().await;
    insert_work(&pool, NewWork::new(1, "A", "user_a").category(Category::Sport)).await;
    insert_work(&pool, NewWork::new(2, "B", "user_a")).await;
    let app = create_test_router(&pool, FakeIdentityService::with_users([]));

    let (status, body) =
        send_request(app.clone(), get_request("/?category=macro&page=abc", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_works"], 2);
    assert_eq!(body["page"], 1);
    assert!(body["category"].is_null());
    assert_eq!(
        body["metadata"]["title"],
        "Browse thousands of Macro images for design inspiration | Photorio"
    );

    let (_, body) = send_request(app.clone(), get_request("/?category=Sport", None)).await;
    assert_eq!(body["total_works"], 1);
    assert_eq!(body["category"], "Sport");

    let (_, body) = send_request(app, get_request("/", None)).await;
    assert_eq!(body["metadata"]["title"], "Photorio");
    assert_eq!(
        body["metadata"]["description"],
        "Share your images and become a part of Photorio"
    );
}

#[tokio::test]
async fn home_page_second_page() {
    let pool = setup_test_db().await;
    for n in 1..=14 {
        insert_work(&pool, NewWork::new(n, "Frame", "user_a")).await;
    }
    let app = create_test_router(&pool, FakeIdentityService::with_users([]));

    let (status, body) = send_request(app, get_request("/?page=2", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["page_count"], 2);
    assert_eq!(body["works"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_work_id_is_404() {
    let pool = setup_test_db().await;
    let app = create_test_router(&pool, FakeIdentityService::with_users([]));

    let (status, body) = send_request(app, get_request("/work/not-a-valid-id", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn missing_work_is_404() {
    let pool = setup_test_db().await;
    let app = create_test_router(&pool, FakeIdentityService::with_users([]));

    let (status, _) = send_request(app, get_request(&format!("/work/{}", work_id(7)), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn work_page_for_owner_and_visitor() {
    let pool = setup_test_db().await;
    insert_work(&pool, NewWork::new(1, "Bride", "user_a").category(Category::Wedding)).await;
    for n in 2..=4 {
        insert_work(&pool, NewWork::new(n, "Mine too", "user_a")).await;
    }
    for n in 10..=19 {
        insert_work(&pool, NewWork::new(n, "Ceremony", "user_b").category(Category::Wedding)).await;
    }
    let app = create_test_router(&pool, FakeIdentityService::with_users([]));
    let uri = format!("/work/{}", work_id(1));

    let (status, body) = send_request(app.clone(), get_request(&uri, Some("user_a"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_owner"], true);
    assert_eq!(body["edit_url"], format!("/work/{}/edit", work_id(1)));
    assert_eq!(body["metadata"]["title"], "Bride | Photorio");
    assert_eq!(body["metadata"]["description"], "About Bride");
    assert_eq!(
        body["metadata"]["images"][0],
        format!("https://img.example/{}.jpg", work_id(1))
    );
    assert_eq!(body["more_works"].as_array().unwrap().len(), 3);
    assert_eq!(body["also_like_works"].as_array().unwrap().len(), 6);
    assert_eq!(body["has_also_like_works"], true);
    for w in body["also_like_works"].as_array().unwrap() {
        assert_ne!(w["id"], work_id(1));
        assert_eq!(w["category"], "Wedding");
    }

    let (_, body) = send_request(app, get_request(&uri, Some("user_b"))).await;
    assert_eq!(body["is_owner"], false);
    assert!(body["edit_url"].is_null());
}

#[tokio::test]
async fn work_page_without_similar_works_hides_also_like() {
    let pool = setup_test_db().await;
    insert_work(&pool, NewWork::new(1, "Lonely", "user_a").category(Category::Fashion)).await;
    let app = create_test_router(&pool, FakeIdentityService::with_users([]));

    let (status, body) =
        send_request(app, get_request(&format!("/work/{}", work_id(1)), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_also_like_works"], false);
    assert!(body["also_like_works"].as_array().unwrap().is_empty());
    assert_eq!(body["is_owner"], false);
}

#[tokio::test]
async fn about_page_unknown_username_is_404() {
    let pool = setup_test_db().await;
    let app = create_test_router(&pool, FakeIdentityService::with_users([]));

    let (status, body) = send_request(app, get_request("/alice/about", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "profile `alice` not found");
}

#[tokio::test]
async fn about_page_for_owner_looks_up_identity_once() {
    let pool = setup_test_db().await;
    insert_profile(&pool, "alice", "user_alice").await;
    insert_work(&pool, NewWork::new(1, "Dunes", "user_alice")).await;
    let identity = FakeIdentityService::with_users([common::identity("user_alice", "Alice", "Nguyen")]);
    let app = create_test_router(&pool, identity.clone());

    let (status, body) = send_request(app, get_request("/alice/about", Some("user_alice"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_owner"], true);
    assert_eq!(body["metadata"]["title"], "Alice Nguyen | Photorio");
    assert_eq!(
        body["metadata"]["canonical_url"],
        "https://photorio.example/alice/about"
    );
    assert_eq!(body["profile"]["username"], "alice");
    assert_eq!(body["user"]["id"], "user_alice");
    assert_eq!(body["total_works"], 1);
    assert_eq!(identity.requested(), vec!["user_alice".to_string()]);
}

#[tokio::test]
async fn about_page_for_visitor() {
    let pool = setup_test_db().await;
    insert_profile(&pool, "alice", "user_alice").await;
    let identity = FakeIdentityService::with_users([
        common::identity("user_alice", "Alice", "Nguyen"),
        common::identity("user_bob", "Bob", "Tran"),
    ]);
    let app = create_test_router(&pool, identity.clone());

    let (status, body) = send_request(app, get_request("/alice/about", Some("user_bob"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_owner"], false);
    assert_eq!(body["user"]["first_name"], "Alice");
    assert_eq!(identity.requested(), vec!["user_alice".to_string()]);
}

#[tokio::test]
async fn about_page_unknown_username_is_404_during_identity_outage() {
    let pool = setup_test_db().await;
    let identity = FakeIdentityService::with_users([]);
    identity.set_failing(true);
    let app = create_test_router(&pool, identity.clone());

    let (status, body) = send_request(app, get_request("/nobody/about", Some("user_bob"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "profile `nobody` not found");
    assert_eq!(identity.calls(), 0);
}

#[tokio::test]
async fn identity_outage_is_a_generic_500() {
    let pool = setup_test_db().await;
    insert_profile(&pool, "alice", "user_alice").await;
    let identity = FakeIdentityService::with_users([]);
    identity.set_failing(true);
    let app = create_test_router(&pool, identity);

    let (status, body) = send_request(app, get_request("/alice/about", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal server error");
}

#[tokio::test]
async fn sign_up_page_metadata() {
    let pool = setup_test_db().await;
    let app = create_test_router(&pool, FakeIdentityService::with_users([]));

    let (status, body) = send_request(app, get_request("/sign-up", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["title"], "Sign Up | Photorio");
}
