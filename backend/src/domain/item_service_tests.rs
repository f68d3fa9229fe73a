//! Tests for the item mutation service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{ItemPersistenceError, MockItemRepository};
use crate::domain::{
    ErrorCode, ItemLookup, NumericInput, ports::ItemRepository,
};
use crate::outbound::memory::InMemoryItemRepository;
use crate::test_support::{fixture_clock, fixture_now, fixture_session};
use rstest::{fixture, rstest};

#[fixture]
fn submission() -> ItemSubmission {
    ItemSubmission {
        name: "Walnut Tray".to_owned(),
        description: "Oiled walnut serving tray with brass handles".to_owned(),
        price: Some(NumericInput::Number(48.0)),
        stock: Some(NumericInput::Text("12".to_owned())),
        currency: Some("eur".to_owned()),
        category: Some("Kitchen".to_owned()),
        tags: Some("wood, serving ,,brass".to_owned()),
    }
}

fn untouched_repository() -> MockItemRepository {
    let mut repo = MockItemRepository::new();
    repo.expect_insert().times(0);
    repo
}

#[rstest]
#[case::valid(None)]
#[case::negative_price(Some(NumericInput::Number(-5.0)))]
#[case::garbage_price(Some(NumericInput::Text("free".to_owned())))]
#[tokio::test]
async fn missing_session_is_unauthorized_whatever_the_payload(
    mut submission: ItemSubmission,
    #[case] price_override: Option<NumericInput>,
) {
    if price_override.is_some() {
        submission.price = price_override;
    }
    let service = ItemService::new(Arc::new(untouched_repository()), fixture_clock());

    let err = service
        .create_item(None, submission)
        .await
        .expect_err("no session");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case(NumericInput::Number(-0.5))]
#[case(NumericInput::Number(-100.0))]
#[case(NumericInput::Text("-1".to_owned()))]
#[case(NumericInput::Text("twelve".to_owned()))]
#[case(NumericInput::Text(String::new()))]
#[tokio::test]
async fn bad_prices_fail_validation(mut submission: ItemSubmission, #[case] price: NumericInput) {
    submission.price = Some(price);
    let service = ItemService::new(Arc::new(untouched_repository()), fixture_clock());
    let session = fixture_session();

    let err = service
        .create_item(Some(&session), submission)
        .await
        .expect_err("invalid price");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().and_then(|d| d.get("field")).and_then(|f| f.as_str()),
        Some("price")
    );
}

#[rstest]
#[tokio::test]
async fn persistence_failure_is_generic(submission: ItemSubmission) {
    let mut repo = MockItemRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(ItemPersistenceError::query("disk full on /var/lib/pg")));
    let service = ItemService::new(Arc::new(repo), fixture_clock());
    let session = fixture_session();

    let err = service
        .create_item(Some(&session), submission)
        .await
        .expect_err("insert fails");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), ITEM_SAVE_FAILED_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn created_item_round_trips_through_the_store(submission: ItemSubmission) {
    let repo = Arc::new(InMemoryItemRepository::default());
    let service = ItemService::new(Arc::clone(&repo), fixture_clock());
    let session = fixture_session();

    let id = service
        .create_item(Some(&session), submission)
        .await
        .expect("item created");
    let stored = repo
        .find(&ItemLookup::Id(id))
        .await
        .expect("lookup succeeds")
        .expect("item stored");

    assert_eq!(stored.name, "Walnut Tray");
    assert_eq!(stored.description, "Oiled walnut serving tray with brass handles");
    assert_eq!(stored.price, 48.0);
    assert_eq!(stored.stock, 12);
    assert_eq!(stored.currency, "EUR");
    assert_eq!(stored.category, "Kitchen");
    assert_eq!(stored.tags, vec!["wood", "serving", "brass"]);
    assert_eq!(stored.status, "active");
    assert_eq!(stored.created_at, Some(fixture_now()));
    let creator = stored.created_by.expect("creator stamped");
    assert_eq!(creator.user_id, session.id);
    assert_eq!(creator.email, session.email);
}
