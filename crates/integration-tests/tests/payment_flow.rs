//! Payment initiation tests over the scripted commerce double.

use rust_decimal::Decimal;

use seastack_core::{CheckoutId, OrderId};
use seastack_integration_tests::{MockCommerce, address, store_with_items};
use seastack_storefront::cart::{CartAction, CartStore, CheckoutState};
use seastack_storefront::config::PaymentConfig;
use seastack_storefront::payment::{
    KlarnaProvider, PaymentError, PaymentFlow, PaymentPhase, StripeProvider, SuccessMarker,
};

fn payment_config() -> PaymentConfig {
    PaymentConfig {
        return_base_url: "https://shop.example.test/return".to_string(),
        server_base_url: "https://commerce.example.test".to_string(),
    }
}

fn checkout_state(email: &str) -> CheckoutState {
    CheckoutState {
        id: CheckoutId::new("checkout-1"),
        email: email.to_string(),
        billing_address: address("NO"),
        shipping_address: address("NO"),
        accepts_terms_conditions: true,
        accepts_purchase_conditions: true,
    }
}

fn store_ready_for_payment(email: &str) -> CartStore {
    let mut store = store_with_items(&[(1, 1, Decimal::new(1000, 2))], &["line-1"]);
    store.dispatch(CartAction::SetCheckoutState(checkout_state(email)));
    store
}

#[tokio::test]
async fn stripe_initiation_reaches_awaiting_redirect() {
    let api = MockCommerce::new();
    let store = store_ready_for_payment("kari@example.com");
    let provider = StripeProvider::new(&payment_config());
    let mut flow = PaymentFlow::new();

    flow.initiate(&api, &provider, &store, None)
        .await
        .expect("initiation succeeds");

    let PaymentPhase::AwaitingRedirect(session) = flow.phase() else {
        panic!("expected AwaitingRedirect, got {:?}", flow.phase());
    };
    assert_eq!(session.order_id, OrderId::new("order-1"));
    assert_eq!(session.redirect_url, "https://pay.stripe.test/session/cs_1");
    assert_eq!(
        session.success_marker,
        SuccessMarker::Contains(
            "https://shop.example.test/return?order_id=order-1&payment_processor=STRIPE"
                .to_string()
        )
    );
    assert_eq!(api.calls(), vec!["create_payment_stripe"]);
}

#[tokio::test]
async fn success_redirect_completes_the_flow() {
    let api = MockCommerce::new();
    let store = store_ready_for_payment("kari@example.com");
    let provider = StripeProvider::new(&payment_config());
    let mut flow = PaymentFlow::new();
    flow.initiate(&api, &provider, &store, None)
        .await
        .expect("initiation succeeds");

    // Intermediate provider navigation is ignored
    assert!(!flow.observe_navigation("https://pay.stripe.test/session/cs_1/3ds"));

    assert!(flow.observe_navigation(
        "https://shop.example.test/return?order_id=order-1&payment_processor=STRIPE"
    ));
    assert_eq!(
        flow.phase(),
        &PaymentPhase::Succeeded {
            order_id: OrderId::new("order-1")
        }
    );
}

#[tokio::test]
async fn empty_email_awaits_input_without_network_calls() {
    let api = MockCommerce::new();
    let store = store_ready_for_payment("");
    let provider = StripeProvider::new(&payment_config());
    let mut flow = PaymentFlow::new();

    flow.initiate(&api, &provider, &store, None)
        .await
        .expect("email gate is not an error");

    assert_eq!(flow.phase(), &PaymentPhase::AwaitingEmail);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn email_without_at_sign_awaits_input() {
    let api = MockCommerce::new();
    let store = store_ready_for_payment("kari@example.com");
    let provider = StripeProvider::new(&payment_config());
    let mut flow = PaymentFlow::new();

    flow.initiate(&api, &provider, &store, Some("kari.example.com"))
        .await
        .expect("email gate is not an error");

    assert_eq!(flow.phase(), &PaymentPhase::AwaitingEmail);
    assert!(api.calls().is_empty());

    // Submitting a valid email returns to idle, ready to re-initiate
    flow.submit_email("kari@example.com")
        .expect("valid email accepted");
    assert_eq!(flow.phase(), &PaymentPhase::Idle);
}

#[tokio::test]
async fn cancel_then_retry_creates_a_fresh_session() {
    let api = MockCommerce::new();
    let store = store_ready_for_payment("kari@example.com");
    let provider = StripeProvider::new(&payment_config());
    let mut flow = PaymentFlow::new();

    flow.initiate(&api, &provider, &store, None)
        .await
        .expect("first initiation succeeds");
    flow.cancel();
    assert_eq!(flow.phase(), &PaymentPhase::Idle);

    flow.initiate(&api, &provider, &store, None)
        .await
        .expect("second initiation succeeds");

    // A fresh session was created; the stale order id is not reused
    let PaymentPhase::AwaitingRedirect(session) = flow.phase() else {
        panic!("expected AwaitingRedirect, got {:?}", flow.phase());
    };
    assert_eq!(session.order_id, OrderId::new("order-2"));
    assert_eq!(
        api.calls(),
        vec!["create_payment_stripe", "create_payment_stripe"]
    );
}

#[tokio::test]
async fn missing_checkout_routes_back_without_initiating() {
    let api = MockCommerce::new();
    // Items but no checkout state
    let store = store_with_items(&[(1, 1, Decimal::new(1000, 2))], &["line-1"]);
    let provider = StripeProvider::new(&payment_config());
    let mut flow = PaymentFlow::new();

    let result = flow.initiate(&api, &provider, &store, None).await;

    assert!(matches!(result, Err(PaymentError::MissingCheckout)));
    assert_eq!(flow.phase(), &PaymentPhase::Idle);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn initiation_failure_is_surfaced_without_retry() {
    let api = MockCommerce::new();
    api.fail_on("create_payment_stripe");
    let store = store_ready_for_payment("kari@example.com");
    let provider = StripeProvider::new(&payment_config());
    let mut flow = PaymentFlow::new();

    let result = flow.initiate(&api, &provider, &store, None).await;

    assert!(matches!(result, Err(PaymentError::Commerce(_))));
    assert!(matches!(flow.phase(), PaymentPhase::Failed { .. }));
    // Exactly one attempt; no automatic retry
    assert_eq!(api.calls(), vec!["create_payment_stripe"]);
}

#[tokio::test]
async fn klarna_redirects_to_the_widget_endpoint() {
    let api = MockCommerce::new();
    let store = store_ready_for_payment("kari@example.com");
    let provider = KlarnaProvider::new(&payment_config());
    let mut flow = PaymentFlow::new();

    flow.initiate(&api, &provider, &store, None)
        .await
        .expect("initiation succeeds");

    let PaymentPhase::AwaitingRedirect(session) = flow.phase() else {
        panic!("expected AwaitingRedirect, got {:?}", flow.phase());
    };
    assert_eq!(
        session.redirect_url,
        "https://commerce.example.test/api/checkout/checkout-1/payment-klarna-html-body"
    );
    assert_eq!(
        session.success_marker,
        SuccessMarker::Prefix("https://shop.example.test/return".to_string())
    );

    // Any navigation under the return base completes the flow
    assert!(flow.observe_navigation("https://shop.example.test/return?order_id=order-1"));
}

#[tokio::test]
async fn checkout_email_is_used_when_none_is_supplied() {
    let api = MockCommerce::new();
    let store = store_ready_for_payment("stored@example.com");
    let provider = StripeProvider::new(&payment_config());
    let mut flow = PaymentFlow::new();

    flow.initiate(&api, &provider, &store, None)
        .await
        .expect("initiation succeeds");

    assert!(matches!(flow.phase(), PaymentPhase::AwaitingRedirect(_)));
}
