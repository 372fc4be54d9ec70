use cinebase::filter::{FilterManager, FilterPhase, FilterSet, DEFAULT_DEBOUNCE};
use cinebase::framework::mock::{create_mock_client, expect_list};
use cinebase::framework::{GatewayError, ListQuery, ResourceRequest};
use cinebase::model::Actor;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};

type Requests = mpsc::Receiver<ResourceRequest<Actor>>;

/// Starts a manager and answers its initial unfiltered fetch with `initial`.
async fn start(initial: Vec<Actor>) -> (cinebase::filter::FilterHandle<Actor>, Requests) {
    let (client, mut requests) = create_mock_client::<Actor>(16);
    let (manager, filters) =
        FilterManager::new(client, FilterSet::for_kind::<Actor>(), DEFAULT_DEBOUNCE);
    tokio::spawn(manager.run());

    let (query, respond) = expect_list(&mut requests).await.expect("initial fetch");
    assert_eq!(query, ListQuery::all());
    respond.send(Ok(initial)).unwrap();
    filters.settled().await.unwrap();
    (filters, requests)
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_issue_one_fetch_with_the_last_value() {
    let (filters, mut requests) = start(vec![]).await;

    for value in ["A", "Al", "Ali", "Alic"] {
        filters.set("nom", value).await.unwrap();
        sleep(Duration::from_millis(100)).await;
    }
    assert!(requests.try_recv().is_err(), "fetched inside the quiet period");
    assert_eq!(filters.snapshot().phase, FilterPhase::PendingDebounce);

    let waiting = Instant::now();
    let (query, respond) = expect_list(&mut requests).await.unwrap();
    assert_eq!(query.param("nom"), Some("Alic"));
    assert_eq!(query.params.len(), 1);
    assert!(waiting.elapsed() >= Duration::from_millis(200));

    respond.send(Ok(vec![Actor::new("actor_1", "Alice")])).unwrap();
    let snapshot = filters.settled().await.unwrap();
    assert_eq!(snapshot.seq, 2);
    assert_eq!(snapshot.records.len(), 1);

    sleep(Duration::from_secs(1)).await;
    assert!(requests.try_recv().is_err(), "only one fetch per burst");
}

#[tokio::test(start_paused = true)]
async fn emptied_field_is_left_out_of_the_next_query() {
    let (filters, mut requests) = start(vec![]).await;

    filters.set("nom", "x").await.unwrap();
    let (query, respond) = expect_list(&mut requests).await.unwrap();
    assert_eq!(query.param("nom"), Some("x"));
    respond.send(Ok(vec![])).unwrap();
    filters.settled().await.unwrap();

    filters.set("nom", "").await.unwrap();
    let (query, respond) = expect_list(&mut requests).await.unwrap();
    assert_eq!(query, ListQuery::all());
    respond.send(Ok(vec![])).unwrap();

    let snapshot = filters.settled().await.unwrap();
    assert_eq!(snapshot.filters.get("nom"), "");
}

#[tokio::test(start_paused = true)]
async fn stale_results_are_discarded() {
    let (filters, mut requests) = start(vec![]).await;

    filters.set("nom", "a").await.unwrap();
    let (_, slow) = expect_list(&mut requests).await.unwrap();

    filters.set("nom", "b").await.unwrap();
    let (query, fast) = expect_list(&mut requests).await.unwrap();
    assert_eq!(query.param("nom"), Some("b"));

    fast.send(Ok(vec![Actor::new("actor_2", "Bob")])).unwrap();
    let snapshot = filters.settled().await.unwrap();
    assert_eq!(snapshot.seq, 3);
    assert_eq!(snapshot.records[0].name, "Bob");

    // The older request completes last and must not overwrite the newer list.
    slow.send(Ok(vec![Actor::new("actor_1", "Alice")])).unwrap();
    sleep(Duration::from_millis(10)).await;
    let snapshot = filters.snapshot();
    assert_eq!(snapshot.records.len(), 1);
    assert_eq!(snapshot.records[0].name, "Bob");
    assert_eq!(snapshot.phase, FilterPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_keeps_previous_records() {
    let (filters, mut requests) = start(vec![Actor::new("actor_1", "Alice")]).await;

    filters.refresh().await.unwrap();
    let (_, respond) = expect_list(&mut requests).await.unwrap();
    respond
        .send(Err(GatewayError::Status {
            status: 500,
            body: "boom".to_string(),
        }))
        .unwrap();

    let snapshot = filters.settled().await.unwrap();
    assert_eq!(snapshot.records.len(), 1);
    assert!(snapshot.error.as_deref().unwrap_or("").contains("500"));
}

#[tokio::test(start_paused = true)]
async fn refresh_fetches_without_waiting() {
    let (filters, mut requests) = start(vec![]).await;

    filters.set("nationalite", "Fran").await.unwrap();
    let issued = Instant::now();
    filters.refresh().await.unwrap();

    let (query, respond) = expect_list(&mut requests).await.unwrap();
    assert!(issued.elapsed() < DEFAULT_DEBOUNCE);
    assert_eq!(query.param("nationalite"), Some("Fran"));
    respond.send(Ok(vec![])).unwrap();
    filters.settled().await.unwrap();

    // The pending deadline was cancelled by the refresh.
    sleep(Duration::from_secs(1)).await;
    assert!(requests.try_recv().is_err());
}
