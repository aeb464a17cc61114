mod common;

use actix_web::{App, http::StatusCode, test, web};
use common::{FakeScope, FakeService, Harness};
use edulink::routes::api::registration_config;
use serde_json::{Value, json};

macro_rules! app {
    ($harness:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($harness.workflow()))
                .service(web::scope("/api").configure(
                    registration_config::<FakeScope, FakeService, FakeService, FakeService>,
                )),
        )
        .await
    };
}

#[actix_web::test]
async fn register_returns_created_envelope() {
    let harness = Harness::new();
    let app = app!(harness);

    let request = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "role": "student",
            "name": "Ada",
            "email": "a@x.com",
            "password": "correct horse",
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["email"], json!("a@x.com"));
    assert_eq!(body["data"]["redirect_to"], json!("/register/success"));
    assert_eq!(harness.student.calls(), 1);
}

#[actix_web::test]
async fn non_string_roles_get_the_failure_envelope() {
    for role in [json!(null), json!(7)] {
        let harness = Harness::new();
        let app = app!(harness);

        let request = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"role": role, "email": "a@x.com", "password": "correct horse"}))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{role}");
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("Invalid role"), "{body}");
        assert_eq!(body["input"]["email"], json!("a@x.com"));
        assert!(body["input"].get("password").is_none());
        assert_eq!(harness.total_calls(), 0);

        let (_, commits, rollbacks, _) = harness.scope.snapshot();
        assert_eq!((commits, rollbacks), (0, 1));
    }
}

#[actix_web::test]
async fn head_on_register_is_not_allowed() {
    let harness = Harness::new();
    let app = app!(harness);

    let request = test::TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri("/api/auth/register")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(harness.total_calls(), 0);
}
