//! Test doubles for the cart service boundary.
//!
//! [`MockCartService`] scripts responses with an expectation queue and
//! answers in FIFO order. The raw channel helpers ([`raw_client`],
//! [`expect_fetch`], ...) hand the responder back to the test instead, so
//! a test can delay a response or answer out of order; that is how the
//! load-race behavior is pinned down.

use crate::clients::CartServiceClient;
use crate::model::{CartItem, ProductId};
use crate::service::protocol::{CartRequest, ServiceError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock service.
enum Expectation {
    Fetch {
        response: Result<Vec<CartItem>, ServiceError>,
    },
    Add {
        product_id: ProductId,
        response: Result<(), ServiceError>,
    },
    Remove {
        product_id: ProductId,
        response: Result<(), ServiceError>,
    },
    Clear {
        response: Result<(), ServiceError>,
    },
}

type ExpectationQueue = Arc<Mutex<VecDeque<Expectation>>>;

/// A scripted cart service for tests.
///
/// # Example
/// ```ignore
/// let mut mock = MockCartService::new();
/// mock.expect_fetch().return_ok(vec![item]);
/// mock.expect_add("p1").return_err(ServiceError::rejected("Out of stock."));
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockCartService {
    client: CartServiceClient,
    expectations: ExpectationQueue,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockCartService {
    /// Creates a new mock service with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<CartRequest>(100);
        let expectations: ExpectationQueue = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_task = expectations.clone();

        // Background task answering each request from the expectation queue.
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_task.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        CartRequest::Fetch { respond_to },
                        Some(Expectation::Fetch { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        CartRequest::Add {
                            product_id,
                            respond_to,
                            ..
                        },
                        Some(Expectation::Add {
                            product_id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(product_id, expected, "add for an unexpected product");
                        let _ = respond_to.send(response);
                    }
                    (
                        CartRequest::Remove {
                            product_id,
                            respond_to,
                        },
                        Some(Expectation::Remove {
                            product_id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(product_id, expected, "remove for an unexpected product");
                        let _ = respond_to.send(response);
                    }
                    (
                        CartRequest::Clear { respond_to, .. },
                        Some(Expectation::Clear { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: CartServiceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> CartServiceClient {
        self.client.clone()
    }

    /// Expects a `fetch` operation.
    pub fn expect_fetch(&mut self) -> FetchExpectationBuilder {
        FetchExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `add` operation for the given product.
    pub fn expect_add(&mut self, product_id: impl Into<ProductId>) -> AddExpectationBuilder {
        AddExpectationBuilder {
            product_id: product_id.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `remove` operation for the given product.
    pub fn expect_remove(&mut self, product_id: impl Into<ProductId>) -> RemoveExpectationBuilder {
        RemoveExpectationBuilder {
            product_id: product_id.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a batched `clear` operation.
    pub fn expect_clear(&mut self) -> ClearExpectationBuilder {
        ClearExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `fetch` expectations.
pub struct FetchExpectationBuilder {
    expectations: ExpectationQueue,
}

impl FetchExpectationBuilder {
    pub fn return_ok(self, items: Vec<CartItem>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Fetch { response: Ok(items) });
    }

    pub fn return_err(self, error: ServiceError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Fetch {
                response: Err(error),
            });
    }
}

/// Builder for `add` expectations.
pub struct AddExpectationBuilder {
    product_id: ProductId,
    expectations: ExpectationQueue,
}

impl AddExpectationBuilder {
    pub fn return_ok(self) {
        self.expectations.lock().unwrap().push_back(Expectation::Add {
            product_id: self.product_id,
            response: Ok(()),
        });
    }

    pub fn return_err(self, error: ServiceError) {
        self.expectations.lock().unwrap().push_back(Expectation::Add {
            product_id: self.product_id,
            response: Err(error),
        });
    }
}

/// Builder for `remove` expectations.
pub struct RemoveExpectationBuilder {
    product_id: ProductId,
    expectations: ExpectationQueue,
}

impl RemoveExpectationBuilder {
    pub fn return_ok(self) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Remove {
                product_id: self.product_id,
                response: Ok(()),
            });
    }

    pub fn return_err(self, error: ServiceError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Remove {
                product_id: self.product_id,
                response: Err(error),
            });
    }
}

/// Builder for `clear` expectations.
pub struct ClearExpectationBuilder {
    expectations: ExpectationQueue,
}

impl ClearExpectationBuilder {
    pub fn return_ok(self) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Clear { response: Ok(()) });
    }

    pub fn return_err(self, error: ServiceError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Clear {
                response: Err(error),
            });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client wired to a bare channel, so the test owns the server side.
///
/// Unlike [`MockCartService`], nothing answers automatically: the test
/// receives each [`CartRequest`] and decides when and how to respond. Use
/// this when response timing matters (e.g. racing two loads).
pub fn raw_client(buffer_size: usize) -> (CartServiceClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CartServiceClient::new(sender), receiver)
}

/// Receives the next request, asserting it is a `Fetch`, and hands back the responder.
pub async fn expect_fetch(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> oneshot::Sender<Result<Vec<CartItem>, ServiceError>> {
    match receiver.recv().await {
        Some(CartRequest::Fetch { respond_to }) => respond_to,
        other => panic!("expected a fetch request, got {other:?}"),
    }
}

/// Receives the next request, asserting it is an `Add`.
pub async fn expect_add(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> (ProductId, u32, oneshot::Sender<Result<(), ServiceError>>) {
    match receiver.recv().await {
        Some(CartRequest::Add {
            product_id,
            quantity,
            respond_to,
        }) => (product_id, quantity, respond_to),
        other => panic!("expected an add request, got {other:?}"),
    }
}

/// Receives the next request, asserting it is a `Remove`.
pub async fn expect_remove(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> (ProductId, oneshot::Sender<Result<(), ServiceError>>) {
    match receiver.recv().await {
        Some(CartRequest::Remove {
            product_id,
            respond_to,
        }) => (product_id, respond_to),
        other => panic!("expected a remove request, got {other:?}"),
    }
}

/// Receives the next request, asserting it is a `Clear`.
pub async fn expect_clear(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> (Vec<ProductId>, oneshot::Sender<Result<(), ServiceError>>) {
    match receiver.recv().await {
        Some(CartRequest::Clear {
            product_ids,
            respond_to,
        }) => (product_ids, respond_to),
        other => panic!("expected a clear request, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CartService;
    use crate::model::ItemStatus;

    fn item(id: &str) -> CartItem {
        CartItem::new(
            id,
            "Test Item",
            "Test Seller",
            "https://img.example/test.png",
            10.0,
            1,
            ItemStatus::AvailableForSale,
        )
    }

    #[tokio::test]
    async fn mock_answers_in_expectation_order() {
        let mut mock = MockCartService::new();
        mock.expect_add("p1").return_ok();
        mock.expect_fetch().return_ok(vec![item("p1")]);

        let client = mock.client();
        client.add(&"p1".into(), 1).await.unwrap();
        let items = client.fetch().await.unwrap();
        assert_eq!(items.len(), 1);

        mock.verify();
    }

    #[tokio::test]
    async fn raw_client_hands_the_request_to_the_test() {
        let (client, mut receiver) = raw_client(8);

        let fetch_task = tokio::spawn(async move { client.fetch().await });

        let respond_to = expect_fetch(&mut receiver).await;
        respond_to.send(Ok(vec![item("p1")])).unwrap();

        let items = fetch_task.await.unwrap().unwrap();
        assert_eq!(items[0].product_id, ProductId::from("p1"));
    }
}
