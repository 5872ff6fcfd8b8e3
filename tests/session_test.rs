//! End-to-end flows against the in-process cart service, wired through
//! [`CartSession`].

use storefront_cart::lifecycle::CartSession;
use storefront_cart::model::{ItemStatus, ProductId};
use storefront_cart::selection::CheckoutSelection;
use storefront_cart::service::memory::CatalogProduct;
use storefront_cart::sync::CartError;

fn catalog() -> Vec<CatalogProduct> {
    vec![
        CatalogProduct::new(
            "p1",
            "Mechanical Keyboard",
            "KeebWorks",
            "https://img.example/p1.png",
            120.0,
            ItemStatus::AvailableForSale,
        ),
        CatalogProduct::new(
            "p2",
            "Desk Mat",
            "Mats & Co",
            "https://img.example/p2.png",
            25.0,
            ItemStatus::AvailableForSale,
        ),
        CatalogProduct::new(
            "p3",
            "Retired Numpad",
            "KeebWorks",
            "https://img.example/p3.png",
            35.0,
            ItemStatus::Unavailable,
        ),
    ]
}

#[tokio::test]
async fn full_cart_flow_against_the_in_memory_service() {
    let session = CartSession::new(catalog());
    session.auth.sign_in();

    session.cart.add(&"p1".into(), 2).await.unwrap();
    session.cart.add(&"p2".into(), 1).await.unwrap();
    // The service merges repeated adds into one line.
    session.cart.add(&"p1".into(), 1).await.unwrap();

    let state = session.cart.state();
    assert_eq!(state.total_items(), 2);
    assert_eq!(state.items()[0].product_id, ProductId::from("p1"));
    assert_eq!(state.items()[0].quantity, 3);
    assert_eq!(session.cart.total_price(), 3.0 * 120.0 + 25.0);
    assert!(session.cart.is_in_cart(&"p1".into()));

    // Unknown products are rejected with a user-facing tip.
    let err = session.cart.add(&"ghost".into(), 1).await.unwrap_err();
    assert_eq!(
        err,
        CartError::Remote {
            message: "This item is no longer sold.".to_string()
        }
    );
    assert!(session.cart.state().error().is_some());
    // The cart itself survives the failure.
    assert_eq!(session.cart.state().total_items(), 2);

    // The next successful operation clears the recorded error.
    session.cart.load().await.unwrap();
    assert!(session.cart.state().error().is_none());

    session.cart.remove(&"p2".into()).await.unwrap();
    assert!(!session.cart.is_in_cart(&"p2".into()));

    session.cart.clear().await.unwrap();
    assert_eq!(session.cart.state().total_items(), 0);
    // Clearing an empty cart is a local success, no remote call needed.
    session.cart.clear().await.unwrap();

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn unavailable_products_cannot_be_added() {
    let session = CartSession::new(catalog());
    session.auth.sign_in();

    let err = session.cart.add(&"p3".into(), 1).await.unwrap_err();
    assert!(matches!(err, CartError::Remote { .. }));
    assert_eq!(session.cart.state().total_items(), 0);

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn selection_checkout_handoff() {
    let session = CartSession::new(catalog());
    session.auth.sign_in();

    session.cart.add(&"p1".into(), 1).await.unwrap();
    session.cart.add(&"p2".into(), 2).await.unwrap();

    let mut selection = CheckoutSelection::new(session.cart.clone());
    selection.set_all(true);
    assert_eq!(selection.selected_available_count(), 2);
    assert_eq!(selection.selected_total(), 120.0 + 2.0 * 25.0);

    let payload = selection.checkout().expect("checkout enabled");
    assert_eq!(
        payload.product_ids,
        vec![ProductId::from("p1"), ProductId::from("p2")]
    );

    selection.delete_selected().await;
    assert!(selection.selected().is_empty());
    selection.prune();
    assert_eq!(session.cart.state().total_items(), 0);
    assert!(selection.checkout().is_none());

    drop(selection);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn sign_out_resets_the_cart_for_the_next_session() {
    let session = CartSession::new(catalog());
    session.auth.sign_in();

    session.cart.add(&"p1".into(), 1).await.unwrap();
    assert_eq!(session.cart.state().total_items(), 1);

    session.auth.sign_out();
    // The watcher clears local state; poll until it has run.
    for _ in 0..200 {
        if session.cart.state().total_items() == 0 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert_eq!(session.cart.state().total_items(), 0);

    // Signing back in reloads from the service, which still has the line:
    // the sign-out clear was local only.
    session.auth.sign_in();
    for _ in 0..200 {
        if session.cart.state().total_items() == 1 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert_eq!(session.cart.state().total_items(), 1);

    session.shutdown().await.unwrap();
}
