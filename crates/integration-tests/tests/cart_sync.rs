//! Cart service tests: remote orchestration around the local store.

use rust_decimal::Decimal;

use seastack_integration_tests::{MockCommerce, MockLine, add_request};
use seastack_storefront::cart::{CartStore, add_to_cart, select_shipping_country};

#[tokio::test]
async fn first_add_creates_the_cart_lazily() {
    let api = MockCommerce::new();
    api.set_lines(vec![MockLine::new("line-1", 1, &["NO"])]);
    let mut store = CartStore::new("NO", "NOK");

    let local_id = add_to_cart(&api, &mut store, add_request(1, 1, Decimal::new(1000, 2)))
        .await
        .expect("add succeeds");

    assert_eq!(
        api.calls(),
        vec!["create_cart", "add_item", "update_cart:NO"]
    );
    assert!(store.state().cart_id.is_some());
    assert_eq!(store.state().item_count(), 1);
    // The refresh gave the new line a remote id mapping
    assert!(store.state().remote_line_id(local_id).is_some());
}

#[tokio::test]
async fn second_add_reuses_the_cart() {
    let api = MockCommerce::new();
    api.set_lines(vec![MockLine::new("line-1", 1, &["NO"])]);
    let mut store = CartStore::new("NO", "NOK");

    add_to_cart(&api, &mut store, add_request(1, 1, Decimal::new(1000, 2)))
        .await
        .expect("first add succeeds");

    api.set_lines(vec![
        MockLine::new("line-1", 1, &["NO"]),
        MockLine::new("line-2", 2, &["NO"]),
    ]);
    add_to_cart(&api, &mut store, add_request(2, 1, Decimal::new(500, 2)))
        .await
        .expect("second add succeeds");

    assert_eq!(
        api.calls(),
        vec![
            "create_cart",
            "add_item",
            "update_cart:NO",
            "add_item",
            "update_cart:NO",
        ]
    );
    assert_eq!(store.state().item_count(), 2);
}

#[tokio::test]
async fn failed_add_leaves_the_local_mirror_untouched() {
    let api = MockCommerce::new();
    api.fail_on("add_item");
    let mut store = CartStore::new("NO", "NOK");

    let result = add_to_cart(&api, &mut store, add_request(1, 1, Decimal::new(1000, 2))).await;

    assert!(result.is_err());
    assert!(store.state().is_empty());
}

#[tokio::test]
async fn country_selection_resyncs_the_cart() {
    let api = MockCommerce::new();
    api.set_lines(vec![MockLine::new("line-1", 1, &["NO", "SE"])]);
    let mut store = CartStore::new("NO", "NOK");

    add_to_cart(&api, &mut store, add_request(1, 1, Decimal::new(1000, 2)))
        .await
        .expect("add succeeds");

    select_shipping_country(&api, &mut store, "SE")
        .await
        .expect("country change succeeds");

    assert_eq!(store.state().selected_country, "SE");
    assert!(api.calls().contains(&"update_cart:SE".to_string()));
}

#[tokio::test]
async fn country_selection_without_a_cart_is_local_only() {
    let api = MockCommerce::new();
    let mut store = CartStore::new("NO", "NOK");

    select_shipping_country(&api, &mut store, "SE")
        .await
        .expect("local selection succeeds");

    assert_eq!(store.state().selected_country, "SE");
    assert!(api.calls().is_empty());
}
