//! # Mock Gateway
//!
//! Utilities for testing views and clients without a collaborator.
//!
//! | Tool | Use it when |
//! |------|-------------|
//! | [`MockClient`] / [`MockCatalog`] | You want canned answers and to check which calls happened. |
//! | [`create_mock_client`] + `expect_*` | You need to hold a response back (ordering, staleness, debounce). |
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Actor>::new();
//! mock.expect_create().return_ok("actor_1".to_string());
//! let client = mock.client();
//! // ... exercise code using `client` ...
//! mock.verify();
//! ```

use crate::framework::{
    CatalogClient, CatalogRequest, GatewayError, ListQuery, Record, RecordDraft, RecordId,
    ResourceClient, ResourceRequest, Response,
};
use crate::model::{SearchResults, Suggestions};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A request observed by a mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    List(ListQuery),
    Get(RecordId),
    /// Carries the draft's name.
    Create(String),
    Update(RecordId),
    Delete(RecordId),
    UploadPhoto(RecordId),
    Genres,
    Nationalities,
    Search(String),
    Suggestions,
}

struct MockState<E> {
    expectations: VecDeque<E>,
    calls: Vec<MockCall>,
    unexpected: Vec<MockCall>,
}

type Shared<E> = Arc<Mutex<MockState<E>>>;

fn shared<E>() -> Shared<E> {
    Arc::new(Mutex::new(MockState {
        expectations: VecDeque::new(),
        calls: Vec::new(),
        unexpected: Vec::new(),
    }))
}

/// Sets the canned response for one expected request.
pub struct ExpectationBuilder<E, R> {
    state: Shared<E>,
    wrap: fn(Result<R, GatewayError>) -> E,
}

impl<E, R> ExpectationBuilder<E, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push((self.wrap)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: GatewayError) {
        self.push((self.wrap)(Err(error)));
    }

    fn push(&self, expectation: E) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push_back(expectation);
    }
}

fn verify_state<E>(name: &str, state: &Shared<E>) {
    let state = state.lock().unwrap();
    if !state.unexpected.is_empty() {
        panic!("{name}: unexpected requests: {:?}", state.unexpected);
    }
    if !state.expectations.is_empty() {
        panic!(
            "{name}: not all expectations were met, {} remaining",
            state.expectations.len()
        );
    }
}

// =============================================================================
// RESOURCE MOCK
// =============================================================================

/// Canned response queued on a [`MockClient`].
pub enum Expectation<T: Record> {
    List(Result<Vec<T>, GatewayError>),
    Get(Result<Option<T>, GatewayError>),
    Create(Result<RecordId, GatewayError>),
    Update(Result<T, GatewayError>),
    Delete(Result<(), GatewayError>),
    UploadPhoto(Result<String, GatewayError>),
}

fn describe<T: Record>(request: &ResourceRequest<T>) -> MockCall {
    match request {
        ResourceRequest::List { query, .. } => MockCall::List(query.clone()),
        ResourceRequest::Get { id, .. } => MockCall::Get(id.clone()),
        ResourceRequest::Create { draft, .. } => MockCall::Create(draft.name().to_string()),
        ResourceRequest::Update { id, .. } => MockCall::Update(id.clone()),
        ResourceRequest::Delete { id, .. } => MockCall::Delete(id.clone()),
        ResourceRequest::UploadPhoto { id, .. } => MockCall::UploadPhoto(id.clone()),
    }
}

/// A mock resource service answering from a queue of expectations.
///
/// Requests are matched against expectations in order. A request that does not match the next
/// expectation is recorded as unexpected and its response channel is dropped, so the caller
/// sees [`GatewayError::ServiceDropped`]; [`MockClient::verify`] then fails.
pub struct MockClient<T: Record> {
    client: ResourceClient<T>,
    state: Shared<Expectation<T>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> MockClient<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state = shared::<Expectation<T>>();
        let task_state = Arc::clone(&state);

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let call = describe(&request);
                let expectation = {
                    let mut state = task_state.lock().unwrap();
                    state.calls.push(call.clone());
                    state.expectations.pop_front()
                };

                match (request, expectation) {
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Delete { respond_to, .. }, Some(Expectation::Delete(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        ResourceRequest::UploadPhoto { respond_to, .. },
                        Some(Expectation::UploadPhoto(r)),
                    ) => {
                        let _ = respond_to.send(r);
                    }
                    _ => {
                        task_state.lock().unwrap().unexpected.push(call);
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R>(
        &mut self,
        wrap: fn(Result<R, GatewayError>) -> Expectation<T>,
    ) -> ExpectationBuilder<Expectation<T>, R> {
        ExpectationBuilder {
            state: Arc::clone(&self.state),
            wrap,
        }
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<Expectation<T>, Vec<T>> {
        self.builder(Expectation::List)
    }

    pub fn expect_get(&mut self) -> ExpectationBuilder<Expectation<T>, Option<T>> {
        self.builder(Expectation::Get)
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<Expectation<T>, RecordId> {
        self.builder(Expectation::Create)
    }

    pub fn expect_update(&mut self) -> ExpectationBuilder<Expectation<T>, T> {
        self.builder(Expectation::Update)
    }

    pub fn expect_delete(&mut self) -> ExpectationBuilder<Expectation<T>, ()> {
        self.builder(Expectation::Delete)
    }

    pub fn expect_upload_photo(&mut self) -> ExpectationBuilder<Expectation<T>, String> {
        self.builder(Expectation::UploadPhoto)
    }

    /// Every request received so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Panics if an unexpected request arrived or an expectation is still pending.
    pub fn verify(&self) {
        verify_state(std::any::type_name::<T>(), &self.state);
    }
}

impl<T: Record> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// CATALOG MOCK
// =============================================================================

/// Canned response queued on a [`MockCatalog`].
pub enum CatalogExpectation {
    Genres(Result<Vec<String>, GatewayError>),
    Nationalities(Result<Vec<String>, GatewayError>),
    Search(Result<SearchResults, GatewayError>),
    Suggestions(Result<Suggestions, GatewayError>),
}

/// Mock for the catalog-wide endpoints. Same matching rules as [`MockClient`].
pub struct MockCatalog {
    client: CatalogClient,
    state: Shared<CatalogExpectation>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockCatalog {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<CatalogRequest>(100);
        let state = shared::<CatalogExpectation>();
        let task_state = Arc::clone(&state);

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let call = match &request {
                    CatalogRequest::Genres { .. } => MockCall::Genres,
                    CatalogRequest::Nationalities { .. } => MockCall::Nationalities,
                    CatalogRequest::Search { query, .. } => MockCall::Search(query.clone()),
                    CatalogRequest::Suggestions { .. } => MockCall::Suggestions,
                };
                let expectation = {
                    let mut state = task_state.lock().unwrap();
                    state.calls.push(call.clone());
                    state.expectations.pop_front()
                };

                match (request, expectation) {
                    (
                        CatalogRequest::Genres { respond_to },
                        Some(CatalogExpectation::Genres(r)),
                    ) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        CatalogRequest::Nationalities { respond_to },
                        Some(CatalogExpectation::Nationalities(r)),
                    ) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        CatalogRequest::Search { respond_to, .. },
                        Some(CatalogExpectation::Search(r)),
                    ) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        CatalogRequest::Suggestions { respond_to },
                        Some(CatalogExpectation::Suggestions(r)),
                    ) => {
                        let _ = respond_to.send(r);
                    }
                    _ => {
                        task_state.lock().unwrap().unexpected.push(call);
                    }
                }
            }
        });

        Self {
            client: CatalogClient::new(sender),
            state,
            _handle: handle,
        }
    }

    pub fn client(&self) -> CatalogClient {
        self.client.clone()
    }

    fn builder<R>(
        &mut self,
        wrap: fn(Result<R, GatewayError>) -> CatalogExpectation,
    ) -> ExpectationBuilder<CatalogExpectation, R> {
        ExpectationBuilder {
            state: Arc::clone(&self.state),
            wrap,
        }
    }

    pub fn expect_genres(&mut self) -> ExpectationBuilder<CatalogExpectation, Vec<String>> {
        self.builder(CatalogExpectation::Genres)
    }

    pub fn expect_nationalities(&mut self) -> ExpectationBuilder<CatalogExpectation, Vec<String>> {
        self.builder(CatalogExpectation::Nationalities)
    }

    pub fn expect_search(&mut self) -> ExpectationBuilder<CatalogExpectation, SearchResults> {
        self.builder(CatalogExpectation::Search)
    }

    pub fn expect_suggestions(&mut self) -> ExpectationBuilder<CatalogExpectation, Suggestions> {
        self.builder(CatalogExpectation::Suggestions)
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn verify(&self) {
        verify_state("catalog", &self.state);
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
///
/// Use this when the test needs to decide *when* a response is delivered, e.g. to hold a
/// slow list open while a newer one completes.
pub fn create_mock_client<T: Record>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a List.
pub async fn expect_list<T: Record>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(ListQuery, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a Create.
pub async fn expect_create<T: Record>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Draft, Response<RecordId>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a Delete.
pub async fn expect_delete<T: Record>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(RecordId, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
