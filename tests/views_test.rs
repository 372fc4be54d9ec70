use async_trait::async_trait;
use cinebase::framework::mock::{MockCall, MockCatalog, MockClient};
use cinebase::framework::{GatewayError, ListQuery, PhotoStatus, PhotoUpload, ValidationError};
use cinebase::model::{Actor, Movie, SearchResults, Suggestions};
use cinebase::views::{AdminToggle, CatalogView, Confirm, HomeView, ViewError};
use chrono::NaiveDate;
use std::time::Duration;
use url::Url;

struct Answer(bool);

#[async_trait]
impl Confirm for Answer {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

fn base() -> Url {
    Url::parse("http://localhost:8001").unwrap()
}

fn server_error() -> GatewayError {
    GatewayError::Status {
        status: 500,
        body: "Internal Server Error".to_string(),
    }
}

fn photo() -> PhotoUpload {
    PhotoUpload::jpeg(vec![0xFF, 0xD8, 0xFF])
}

/// A view over `mock` whose initial fetch has been answered with an empty list.
async fn actor_view(mock: &mut MockClient<Actor>, admin: &AdminToggle) -> CatalogView<Actor> {
    mock.expect_list().return_ok(vec![]);
    let view = CatalogView::new(mock.client(), admin.mode(), base(), Duration::from_millis(5));
    view.settled().await.unwrap();
    view
}

// =============================================================================
// CATALOG VIEW
// =============================================================================

#[tokio::test]
async fn failed_create_never_uploads_the_photo() {
    let mut mock = MockClient::<Actor>::new();
    let admin = AdminToggle::new();
    admin.set(true);
    let view = actor_view(&mut mock, &admin).await;
    mock.expect_create().return_err(server_error());

    let mut form = view.editor(None).unwrap();
    form.set("nom", "Alice");
    let result = view.save(&form, Some(photo())).await;

    assert!(matches!(
        result,
        Err(ViewError::Gateway(GatewayError::Status { status: 500, .. }))
    ));
    assert_eq!(
        mock.calls(),
        vec![
            MockCall::List(ListQuery::all()),
            MockCall::Create("Alice".to_string())
        ]
    );
    mock.verify();
}

#[tokio::test]
async fn failed_upload_keeps_the_created_record() {
    let mut mock = MockClient::<Actor>::new();
    let admin = AdminToggle::new();
    admin.set(true);
    let view = actor_view(&mut mock, &admin).await;
    mock.expect_create().return_ok("actor_7".to_string());
    mock.expect_upload_photo().return_err(server_error());
    mock.expect_list()
        .return_ok(vec![Actor::new("actor_7", "Alice")]);

    let mut form = view.editor(None).unwrap();
    form.set("nom", "Alice");
    let outcome = view.save(&form, Some(photo())).await.unwrap();

    assert_eq!(outcome.id, "actor_7");
    assert!(matches!(outcome.photo, PhotoStatus::Failed(_)));
    let snapshot = view.settled().await.unwrap();
    assert_eq!(snapshot.records[0].id, "actor_7");
    assert_eq!(
        mock.calls(),
        vec![
            MockCall::List(ListQuery::all()),
            MockCall::Create("Alice".to_string()),
            MockCall::UploadPhoto("actor_7".to_string()),
            MockCall::List(ListQuery::all()),
        ]
    );
    mock.verify();
}

#[tokio::test]
async fn read_only_views_never_reach_the_gateway() {
    let mut mock = MockClient::<Actor>::new();
    let admin = AdminToggle::new();
    let view = actor_view(&mut mock, &admin).await;

    assert!(!view.can_edit());
    assert!(matches!(view.editor(None), Err(ViewError::ReadOnly)));

    let mut form = cinebase::form::RecordForm::<Actor>::new();
    form.set("nom", "Alice");
    assert!(matches!(view.save(&form, None).await, Err(ViewError::ReadOnly)));

    let alice = Actor::new("actor_1", "Alice");
    assert!(matches!(
        view.delete(&alice, &Answer(true)).await,
        Err(ViewError::ReadOnly)
    ));

    assert_eq!(mock.calls(), vec![MockCall::List(ListQuery::all())]);
    mock.verify();
}

#[tokio::test]
async fn declined_confirmation_sends_no_delete() {
    let mut mock = MockClient::<Actor>::new();
    let admin = AdminToggle::new();
    admin.set(true);
    let view = actor_view(&mut mock, &admin).await;

    let alice = Actor::new("actor_1", "Alice");
    let result = view.delete(&alice, &Answer(false)).await;

    assert!(matches!(result, Err(ViewError::Declined)));
    assert_eq!(mock.calls(), vec![MockCall::List(ListQuery::all())]);
    mock.verify();
}

#[tokio::test]
async fn confirmed_delete_refreshes_the_list() {
    let mut mock = MockClient::<Actor>::new();
    let admin = AdminToggle::new();
    admin.set(true);
    let view = actor_view(&mut mock, &admin).await;
    mock.expect_delete().return_ok(());
    mock.expect_list().return_ok(vec![]);

    let alice = Actor::new("actor_1", "Alice");
    view.delete(&alice, &Answer(true)).await.unwrap();
    view.settled().await.unwrap();

    assert_eq!(
        mock.calls(),
        vec![
            MockCall::List(ListQuery::all()),
            MockCall::Delete("actor_1".to_string()),
            MockCall::List(ListQuery::all()),
        ]
    );
    mock.verify();
}

#[tokio::test]
async fn blank_name_is_rejected_before_any_request() {
    let mut mock = MockClient::<Actor>::new();
    let admin = AdminToggle::new();
    admin.set(true);
    let view = actor_view(&mut mock, &admin).await;

    let mut form = view.editor(None).unwrap();
    form.set("nom", "   ");
    let result = view.save(&form, Some(photo())).await;

    assert!(matches!(
        result,
        Err(ViewError::Validation(ValidationError::MissingName))
    ));
    assert_eq!(mock.calls(), vec![MockCall::List(ListQuery::all())]);
    mock.verify();
}

// =============================================================================
// HOME VIEW
// =============================================================================

fn actors(n: usize) -> Vec<Actor> {
    (1..=n)
        .map(|i| Actor::new(format!("actor_{i}"), format!("Actor {i}")))
        .collect()
}

fn movies(n: usize) -> Vec<Movie> {
    (1..=n)
        .map(|i| Movie::new(format!("movie_{i}"), format!("Movie {i}")))
        .collect()
}

#[tokio::test]
async fn suggestions_fall_back_to_recent_records() {
    let mut catalog = MockCatalog::new();
    let mut actor_mock = MockClient::<Actor>::new();
    let mut movie_mock = MockClient::<Movie>::new();
    catalog.expect_suggestions().return_err(server_error());
    // A collaborator that ignores `limit` still yields six.
    actor_mock.expect_list().return_ok(actors(9));
    movie_mock.expect_list().return_ok(movies(6));

    let home = HomeView::new(
        catalog.client(),
        actor_mock.client(),
        movie_mock.client(),
        6,
        base(),
    );
    let suggestions = home.load_suggestions().await;

    assert_eq!(suggestions.actors.len(), 6);
    assert_eq!(suggestions.movies.len(), 6);
    assert_eq!(suggestions.actors[0].id, "actor_1");
    assert_eq!(suggestions.date, chrono::Local::now().date_naive());
    assert_eq!(actor_mock.calls(), vec![MockCall::List(ListQuery::recent(6))]);
    assert_eq!(movie_mock.calls(), vec![MockCall::List(ListQuery::recent(6))]);
    catalog.verify();
    actor_mock.verify();
    movie_mock.verify();
}

#[tokio::test]
async fn each_kind_falls_back_on_its_own() {
    let mut catalog = MockCatalog::new();
    let mut actor_mock = MockClient::<Actor>::new();
    let mut movie_mock = MockClient::<Movie>::new();
    catalog.expect_suggestions().return_err(server_error());
    actor_mock.expect_list().return_err(server_error());
    movie_mock.expect_list().return_ok(movies(2));

    let home = HomeView::new(
        catalog.client(),
        actor_mock.client(),
        movie_mock.client(),
        6,
        base(),
    );
    let suggestions = home.load_suggestions().await;

    assert!(suggestions.actors.is_empty());
    assert_eq!(suggestions.movies.len(), 2);
    assert_eq!(suggestions.date, chrono::Local::now().date_naive());
}

#[tokio::test]
async fn collaborator_suggestions_are_used_as_is() {
    let mut catalog = MockCatalog::new();
    let actor_mock = MockClient::<Actor>::new();
    let movie_mock = MockClient::<Movie>::new();
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    catalog.expect_suggestions().return_ok(Suggestions {
        actors: actors(2),
        movies: movies(1),
        date,
    });

    let home = HomeView::new(
        catalog.client(),
        actor_mock.client(),
        movie_mock.client(),
        6,
        base(),
    );
    let suggestions = home.load_suggestions().await;

    assert_eq!(suggestions.date, date);
    assert_eq!(suggestions.actors.len(), 2);
    assert!(actor_mock.calls().is_empty());
    assert!(movie_mock.calls().is_empty());
}

#[tokio::test]
async fn blank_search_sends_nothing() {
    let catalog = MockCatalog::new();
    let home = HomeView::new(
        catalog.client(),
        MockClient::<Actor>::new().client(),
        MockClient::<Movie>::new().client(),
        6,
        base(),
    );

    assert!(home.search("").await.is_none());
    assert!(home.search("   ").await.is_none());
    assert!(catalog.calls().is_empty());
}

#[tokio::test]
async fn search_returns_results_and_a_short_preview() {
    let mut catalog = MockCatalog::new();
    catalog.expect_search().return_ok(SearchResults {
        actors: actors(5),
        movies: movies(1),
    });
    catalog.expect_search().return_err(server_error());
    let home = HomeView::new(
        catalog.client(),
        MockClient::<Actor>::new().client(),
        MockClient::<Movie>::new().client(),
        6,
        base(),
    );

    let found = home.search(" Cotillard ").await.unwrap();
    assert_eq!(found.query, "Cotillard");
    assert_eq!(found.results.actors.len(), 5);
    assert_eq!(found.preview.actors.len(), 3);
    assert_eq!(found.preview.movies.len(), 1);

    let failed = home.search("Dujardin").await.unwrap();
    assert!(failed.results.is_empty());
    assert!(failed.error.is_some());

    assert_eq!(
        catalog.calls(),
        vec![
            MockCall::Search("Cotillard".to_string()),
            MockCall::Search("Dujardin".to_string())
        ]
    );
    catalog.verify();
}
