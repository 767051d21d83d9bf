//! `/api/users` endpoints.

use actix_web::test;
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::auth::bearer;
use crate::support::factory::{seed_post, seed_user};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn register_returns_private_view() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "username": "ada",
            "email": "ada@example.test",
            "password": "analytical-engine"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "ada");
    assert_eq!(body["email"], "ada@example.test");
    assert_eq!(body["image_file"], Value::Null);
    assert_eq!(body["image_path"], "/static/profile_pics/default.jpg");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
    Ok(())
}

#[actix_web::test]
async fn duplicate_username_and_email_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "username": alice.user.username,
            "email": "fresh@example.test",
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 409, "UNIQUE_USERNAME", None).await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "username": "someone-else",
            "email": alice.user.email.to_uppercase(),
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 409, "UNIQUE_EMAIL", None).await;
    Ok(())
}

#[actix_web::test]
async fn register_validates_fields() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let cases = [
        (json!({"username": "", "email": "a@b.test", "password": "password123"}), "username"),
        (json!({"username": "x".repeat(51), "email": "a@b.test", "password": "password123"}), "username"),
        (json!({"username": "ok", "email": "not-an-email", "password": "password123"}), "email"),
        (json!({"username": "ok", "email": "a@b.test", "password": "short"}), "password"),
    ];

    for (payload, field) in cases {
        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(resp, 422, "VALIDATION_ERROR", Some(field)).await;
    }
    Ok(())
}

#[actix_web::test]
async fn public_profile_and_missing_user() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", alice.id()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], alice.user.username.as_str());
    assert!(body.get("email").is_none(), "public view must not leak email");

    let req = test::TestRequest::get().uri("/api/users/999999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "USER_NOT_FOUND", None).await;
    Ok(())
}

#[actix_web::test]
async fn me_requires_a_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/api/users/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 401, "UNAUTHORIZED_MISSING_BEARER", None).await;
    Ok(())
}

#[actix_web::test]
async fn user_posts_are_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let bob = seed_user(&state, "bob").await?;
    seed_post(&state, alice.id(), "first", "one").await?;
    seed_post(&state, bob.id(), "not alice's", "two").await?;
    seed_post(&state, alice.id(), "second", "three").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}/posts", alice.id()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Vec<Value> = test::read_body_json(resp).await;
    let titles: Vec<&str> = body.iter().filter_map(|p| p["title"].as_str()).collect();
    assert_eq!(titles, ["second", "first"]);
    assert!(body.iter().all(|p| p["author"]["id"] == alice.id()));

    let req = test::TestRequest::get().uri("/api/users/424242/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "USER_NOT_FOUND", None).await;
    Ok(())
}

#[actix_web::test]
async fn patch_self_updates_fields() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let uri = format!("/api/users/{}", alice.id());

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "username": "alice-renamed", "image_file": "avatar.png" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice-renamed");
    assert_eq!(body["email"], alice.user.email.as_str());
    assert_eq!(body["image_path"], "/media/profile_pics/avatar.png");

    // explicit null resets the picture
    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "image_file": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice-renamed");
    assert_eq!(body["image_file"], Value::Null);
    assert_eq!(body["image_path"], "/static/profile_pics/default.jpg");
    Ok(())
}

#[actix_web::test]
async fn patch_rejects_other_users_and_taken_names() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let bob = seed_user(&state, "bob").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", bob.id()))
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "username": "hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 403, "FORBIDDEN", None).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", alice.id()))
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "email": bob.user.email }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 409, "UNIQUE_EMAIL", None).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", alice.id()))
        .insert_header(bearer(&alice.token))
        .set_json(json!({ "image_file": "../../etc/passwd" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 422, "VALIDATION_ERROR", Some("image_file")).await;
    Ok(())
}

#[actix_web::test]
async fn delete_self_removes_user_and_posts() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let bob = seed_user(&state, "bob").await?;
    let post = seed_post(&state, alice.id(), "bye", "soon gone").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", alice.id()))
        .insert_header(bearer(&bob.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 403, "FORBIDDEN", None).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", alice.id()))
        .insert_header(bearer(&alice.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "POST_NOT_FOUND", None).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", alice.id()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "USER_NOT_FOUND", None).await;
    Ok(())
}
