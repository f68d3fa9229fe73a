//! Handler coverage for the items endpoints over in-memory stores.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::Duration;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::Item;
use crate::domain::ports::{MockSessionTokens, MockSignInService, SessionTokenError};
use crate::inbound::http::session::SESSION_COOKIE;
use crate::inbound::http::test_utils::ports_with;
use crate::test_support::{fixture_item, fixture_now, fixture_session};

fn tokens() -> MockSessionTokens {
    let mut tokens = MockSessionTokens::new();
    tokens.expect_verify().returning(|raw| {
        if raw == "valid" {
            Ok(fixture_session())
        } else {
            Err(SessionTokenError::invalid("unknown token"))
        }
    });
    tokens
}

fn numbered_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|index| {
            let mut item = fixture_item(&format!("Item {index:02}"), index as f64, "Home");
            item.created_at = Some(fixture_now() + Duration::minutes(index as i64));
            item
        })
        .collect()
}

async fn call(items: Vec<Item>, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let state = HttpState::new(ports_with(items, MockSignInService::new(), Arc::new(tokens())));
    let app = actix_test::init_service(
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(list_items)
                .service(featured_items)
                .service(item_categories)
                .service(item_detail)
                .service(create_item),
        ),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn names(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["name"].as_str().expect("name").to_owned())
        .collect()
}

#[rstest]
#[actix_web::test]
async fn listing_clamps_pages_past_the_end() {
    let (status, body) = call(
        numbered_items(20),
        actix_test::TestRequest::get().uri("/api/v1/items?page=5&sort=name-asc"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 3);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["total"], 20);
    assert_eq!(body["pageSize"], 9);
    assert_eq!(names(&body["items"]), vec!["Item 18", "Item 19"]);
    assert_eq!(body["categories"], json!(["Home"]));
}

#[rstest]
#[actix_web::test]
async fn unknown_category_yields_an_empty_first_page() {
    let (status, body) = call(
        numbered_items(4),
        actix_test::TestRequest::get().uri("/api/v1/items?category=%20Garden%20&page=abc"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["items"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn text_search_matches_and_unknown_sort_means_newest() {
    let (_, body) = call(
        numbered_items(12),
        actix_test::TestRequest::get().uri("/api/v1/items?q=ITEM%200&sort=cheapest"),
    )
    .await;

    assert_eq!(body["total"], 10);
    let first_page = names(&body["items"]);
    assert_eq!(first_page.first().map(String::as_str), Some("Item 09"));
}

#[rstest]
#[actix_web::test]
async fn featured_returns_the_three_newest() {
    let (status, body) = call(
        numbered_items(5),
        actix_test::TestRequest::get().uri("/api/v1/items/featured"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Item 04", "Item 03", "Item 02"]);
}

#[rstest]
#[actix_web::test]
async fn categories_are_counted() {
    let items = vec![
        fixture_item("Mug", 10.0, "Kitchen"),
        fixture_item("Pan", 30.0, "Kitchen"),
        fixture_item("Vase", 5.0, " "),
    ];
    let (_, body) = call(
        items,
        actix_test::TestRequest::get().uri("/api/v1/items/categories"),
    )
    .await;

    assert_eq!(
        body,
        json!([{"name": "Kitchen", "count": 2}, {"name": "Uncategorized", "count": 1}])
    );
}

#[rstest]
#[actix_web::test]
async fn detail_resolves_custom_identifiers() {
    let mut item = fixture_item("Lamp", 12.0, "Lighting");
    item.custom_id = Some("itm-001".to_owned());

    let (status, body) = call(
        vec![item],
        actix_test::TestRequest::get().uri("/api/v1/items/itm-001"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "itm-001");
    assert_eq!(body["name"], "Lamp");
}

#[rstest]
#[actix_web::test]
async fn unknown_item_is_not_found() {
    let (status, body) = call(
        numbered_items(1),
        actix_test::TestRequest::get().uri("/api/v1/items/3fa85f64-5717-4562-b3fc-2c963f66afa6"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], ITEM_NOT_FOUND_MESSAGE);
}

#[rstest]
#[case::valid_body(r#"{"name":"Desk","description":"Solid walnut writing desk","price":250}"#)]
#[case::invalid_body(r#"{"price":-1}"#)]
#[case::not_json("definitely not json")]
#[actix_web::test]
async fn anonymous_creation_is_unauthorised(#[case] body: &'static str) {
    let (status, payload) = call(
        Vec::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/items")
            .insert_header(("content-type", "application/json"))
            .set_payload(body),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(payload["message"], LOGIN_REQUIRED_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn forged_cookie_counts_as_anonymous() {
    let (status, _) = call(
        Vec::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/items")
            .cookie(Cookie::new(SESSION_COOKIE, "forged"))
            .set_json(json!({"name": "Desk"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case::negative(json!(-4))]
#[case::text(json!("cheap"))]
#[actix_web::test]
async fn bad_prices_are_rejected_for_signed_in_users(#[case] price: Value) {
    let (status, body) = call(
        Vec::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/items")
            .cookie(Cookie::new(SESSION_COOKIE, "valid"))
            .set_json(json!({
                "name": "Desk",
                "description": "Solid walnut writing desk",
                "price": price,
            })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "price");
}

#[rstest]
#[case::boolean("true")]
#[case::array("[1]")]
#[case::object(r#"{"a":1}"#)]
#[case::beyond_f64("1e400")]
#[actix_web::test]
async fn non_numeric_price_shapes_fail_on_the_price_field(#[case] price: &str) {
    let body = format!(
        r#"{{"name":"Desk","description":"Solid walnut writing desk","price":{price}}}"#
    );
    let (status, payload) = call(
        Vec::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/items")
            .cookie(Cookie::new(SESSION_COOKIE, "valid"))
            .insert_header(("content-type", "application/json"))
            .set_payload(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["details"]["field"], "price");
    assert_eq!(payload["details"]["code"], "invalid_number");
}

#[rstest]
#[actix_web::test]
async fn earlier_rules_win_over_an_unreadable_price() {
    let (status, payload) = call(
        Vec::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/items")
            .cookie(Cookie::new(SESSION_COOKIE, "valid"))
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"name":"Desk","description":"short","price":true}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["details"]["field"], "description");
}

#[rstest]
#[case::stock_too_large(json!(3_000_000_000_u64))]
#[case::stock_as_object(json!({"n": 1}))]
#[actix_web::test]
async fn out_of_range_stock_is_a_validation_error(#[case] stock: Value) {
    let (status, payload) = call(
        Vec::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/items")
            .cookie(Cookie::new(SESSION_COOKIE, "valid"))
            .set_json(json!({
                "name": "Desk",
                "description": "Solid walnut writing desk",
                "price": 10,
                "stock": stock,
            })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["details"]["field"], "stock");
}

#[rstest]
#[case::syntax("{\"name\":", "Request body must be valid JSON.")]
#[case::wrong_shape("[1, 2]", "Request body does not match the item shape.")]
#[actix_web::test]
async fn malformed_bodies_are_described(#[case] body: &'static str, #[case] message: &str) {
    let (status, payload) = call(
        Vec::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/items")
            .cookie(Cookie::new(SESSION_COOKIE, "valid"))
            .insert_header(("content-type", "application/json"))
            .set_payload(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], message);
    assert_eq!(payload["details"]["code"], "invalid_json");
}

#[rstest]
#[actix_web::test]
async fn created_item_can_be_fetched_back() {
    let state = HttpState::new(ports_with(
        Vec::new(),
        MockSignInService::new(),
        Arc::new(tokens()),
    ));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").service(item_detail).service(create_item)),
    )
    .await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/items")
            .cookie(Cookie::new(SESSION_COOKIE, "valid"))
            .set_json(json!({
                "name": "Desk",
                "description": "Solid walnut writing desk",
                "price": "250.5",
                "stock": "3",
                "currency": "gbp",
                "category": "Office",
                "tags": "walnut, , desk",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: CreatedItemDto = actix_test::read_body_json(created).await;

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/items/{}", created.id))
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(fetched).await;
    assert_eq!(body["id"], created.id.as_str());
    assert_eq!(body["name"], "Desk");
    assert_eq!(body["price"], 250.5);
    assert_eq!(body["stock"], 3);
    assert_eq!(body["currency"], "GBP");
    assert_eq!(body["category"], "Office");
    assert_eq!(body["tags"], json!(["walnut", "desk"]));
    assert_eq!(body["status"], "active");
    assert_eq!(body["createdBy"]["email"], "ada@example.com");
}
