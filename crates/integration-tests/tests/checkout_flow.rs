//! End-to-end checkout workflow tests over the scripted commerce double.
//!
//! These pin the workflow's external contract: call sequencing,
//! partial-failure tolerance in shipping resolution, and the guarantee that
//! local validation failures never reach the network.

use rust_decimal::Decimal;

use seastack_integration_tests::{MockCommerce, MockLine, address, store_with_items};
use seastack_storefront::checkout::{
    CheckoutError, CheckoutFlow, ShippingForm, SkipReason, TermsAcceptance, ValidationError,
    WorkflowStep, resolve_shipping,
};

fn accepted() -> TermsAcceptance {
    TermsAcceptance {
        terms_conditions: true,
        purchase_conditions: true,
    }
}

fn flow_at_review(same_as_billing: bool) -> CheckoutFlow {
    let mut flow = CheckoutFlow::new();
    flow.submit_shipping(ShippingForm {
        address: address("NO"),
        email: "kari@example.com".to_string(),
        same_as_billing,
    });
    if !same_as_billing {
        flow.submit_billing(address("NO"));
    }
    flow
}

#[tokio::test]
async fn submission_calls_run_in_fixed_order() {
    let api = MockCommerce::new();
    api.set_lines(vec![MockLine::new("line-1", 1, &["NO", "SE"])]);
    let mut store = store_with_items(&[(1, 2, Decimal::new(1000, 2))], &["line-1"]);
    let mut flow = flow_at_review(true);

    let checkout = flow
        .submit_review(&api, &mut store, accepted())
        .await
        .expect("submission succeeds");

    assert_eq!(
        api.calls(),
        vec![
            "cart_shipping_options",
            "update_item_shipping:line-1:ship-NO",
            "create_checkout",
            "update_checkout",
        ]
    );
    assert_eq!(flow.step(), WorkflowStep::Payment);
    assert_eq!(checkout.email.as_deref(), Some("kari@example.com"));

    // The checkout state is persisted into the store
    let persisted = store.state().checkout.as_ref().expect("checkout persisted");
    assert_eq!(persisted.email, "kari@example.com");
    assert_eq!(persisted.billing_address, address("NO"));
    assert_eq!(persisted.shipping_address, address("NO"));
}

#[tokio::test]
async fn review_scenario_totals_and_identical_addresses() {
    // Cart = one item, qty 2, 10.00 NOK: review sees 20.00 NOK and both
    // addresses deep-equal after the same-as-shipping skip
    let api = MockCommerce::new();
    api.set_lines(vec![MockLine::new("line-1", 1, &["NO"])]);
    let mut store = store_with_items(&[(1, 2, Decimal::new(1000, 2))], &["line-1"]);
    let mut flow = CheckoutFlow::new();

    flow.proceed_to_shipping(&store).expect("cart is non-empty");
    let step = flow.submit_shipping(ShippingForm {
        address: address("NO"),
        email: "kari@example.com".to_string(),
        same_as_billing: true,
    });

    assert_eq!(step, WorkflowStep::Review);
    assert_eq!(flow.billing_address(), flow.shipping_address());

    let subtotal = store.state().subtotal().expect("non-empty cart");
    assert_eq!(subtotal.amount, Decimal::new(2000, 2));
    assert_eq!(subtotal.currency_code, "NOK");

    flow.submit_review(&api, &mut store, accepted())
        .await
        .expect("submission succeeds");
    assert_eq!(flow.step(), WorkflowStep::Payment);
}

#[tokio::test]
async fn partial_shipping_match_does_not_abort() {
    // Two items; only the first has a NO shipping option. The matched item
    // is updated, the unmatched one is skipped, and checkout creation still
    // proceeds.
    let api = MockCommerce::new();
    api.set_lines(vec![
        MockLine::new("line-1", 1, &["NO"]),
        MockLine::new("line-2", 2, &["DE"]),
    ]);
    let mut store = store_with_items(
        &[(1, 1, Decimal::new(1000, 2)), (2, 1, Decimal::new(500, 2))],
        &["line-1", "line-2"],
    );
    let mut flow = flow_at_review(true);

    flow.submit_review(&api, &mut store, accepted())
        .await
        .expect("submission succeeds despite the miss");

    assert_eq!(
        api.calls(),
        vec![
            "cart_shipping_options",
            "update_item_shipping:line-1:ship-NO",
            "create_checkout",
            "update_checkout",
        ]
    );
}

#[tokio::test]
async fn shipping_resolution_reports_skip_reasons() {
    let api = MockCommerce::new();
    api.set_lines(vec![
        MockLine::new("line-1", 1, &["NO"]),
        MockLine::new("line-2", 2, &["DE"]),
    ]);
    // The third item never got a remote mapping
    let store = store_with_items(
        &[
            (1, 1, Decimal::new(1000, 2)),
            (2, 1, Decimal::new(500, 2)),
            (3, 1, Decimal::new(700, 2)),
        ],
        &["line-1", "line-2"],
    );

    let resolution = resolve_shipping(&api, store.state(), "NO")
        .await
        .expect("lookup succeeds");

    assert_eq!(resolution.updated.len(), 1);
    assert_eq!(resolution.skipped.len(), 2);
    assert!(!resolution.is_complete());
    assert_eq!(resolution.skipped[0].reason, SkipReason::NoCountryMatch);
    assert_eq!(resolution.skipped[1].reason, SkipReason::NoRemoteLine);
}

#[tokio::test]
async fn shipping_lookup_failure_aborts_before_checkout_creation() {
    let api = MockCommerce::new();
    api.set_lines(vec![MockLine::new("line-1", 1, &["NO"])]);
    api.fail_on("cart_shipping_options");
    let mut store = store_with_items(&[(1, 1, Decimal::new(1000, 2))], &["line-1"]);
    let mut flow = flow_at_review(true);

    let result = flow.submit_review(&api, &mut store, accepted()).await;

    assert!(matches!(result, Err(CheckoutError::Commerce(_))));
    // Nothing after the failed lookup ran
    assert_eq!(api.calls(), vec!["cart_shipping_options"]);
    // The workflow stays on review with its collected state intact
    assert_eq!(flow.step(), WorkflowStep::Review);
    assert!(flow.shipping_address().is_some());
    assert!(flow.billing_address().is_some());
    assert!(store.state().checkout.is_none());
}

#[tokio::test]
async fn checkout_creation_failure_prevents_update() {
    let api = MockCommerce::new();
    api.set_lines(vec![MockLine::new("line-1", 1, &["NO"])]);
    api.fail_on("create_checkout");
    let mut store = store_with_items(&[(1, 1, Decimal::new(1000, 2))], &["line-1"]);
    let mut flow = flow_at_review(true);

    let result = flow.submit_review(&api, &mut store, accepted()).await;

    assert!(matches!(result, Err(CheckoutError::Commerce(_))));
    assert_eq!(
        api.calls(),
        vec![
            "cart_shipping_options",
            "update_item_shipping:line-1:ship-NO",
            "create_checkout",
        ]
    );
    assert_eq!(flow.step(), WorkflowStep::Review);
}

#[tokio::test]
async fn unaccepted_terms_issue_no_network_calls() {
    let api = MockCommerce::new();
    let mut store = store_with_items(&[(1, 1, Decimal::new(1000, 2))], &["line-1"]);
    let mut flow = flow_at_review(true);

    let result = flow
        .submit_review(
            &api,
            &mut store,
            TermsAcceptance {
                terms_conditions: true,
                purchase_conditions: false,
            },
        )
        .await;

    match result {
        Err(CheckoutError::TermsNotAccepted(terms)) => {
            assert!(terms.terms_accepted);
            assert!(!terms.purchase_accepted);
        }
        other => panic!("expected terms error, got {other:?}"),
    }
    assert!(api.calls().is_empty());
    assert_eq!(flow.step(), WorkflowStep::Review);
}

#[tokio::test]
async fn missing_precondition_issues_no_network_calls() {
    let api = MockCommerce::new();
    let mut store = store_with_items(&[(1, 1, Decimal::new(1000, 2))], &["line-1"]);

    // Review reached without a billing address (controller misuse)
    let mut flow = CheckoutFlow::new();
    flow.submit_shipping(ShippingForm {
        address: address("NO"),
        email: "kari@example.com".to_string(),
        same_as_billing: false,
    });

    let result = flow.submit_review(&api, &mut store, accepted()).await;

    assert!(matches!(
        result,
        Err(CheckoutError::Validation(
            ValidationError::MissingBillingAddress
        ))
    ));
    assert!(api.calls().is_empty());
}
