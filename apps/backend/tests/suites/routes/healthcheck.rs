use actix_web::test;
use serde_json::Value;

use crate::support::test_state::build_state_without_db;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn health_reports_db_and_migrations() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("db_error").is_none());
    assert!(body["migrations"].as_str().is_some_and(|m| m.starts_with("m2026")));
    assert!(body["time"].as_str().is_some_and(|t| t.contains('T')));
    Ok(())
}

#[actix_web::test]
async fn health_without_db_still_answers() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state_without_db().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["db"], "error");
    assert!(body["db_error"].as_str().is_some());
    Ok(())
}
