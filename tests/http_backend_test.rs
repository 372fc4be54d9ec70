//! REST wire behavior against a local stub collaborator.

use cinebase::actors::ActorError;
use cinebase::clients::RecordClient;
use cinebase::filter::FilterSet;
use cinebase::framework::{
    GatewayError, HttpBackend, HttpCatalogService, ListQuery, PhotoUpload, RecordKind,
};
use cinebase::lifecycle::{CatalogSystem, Config};
use cinebase::model::{Actor, ActorDraft, Movie, MovieDraft};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

/// One request as the stub saw it.
#[derive(Debug, Clone)]
struct Captured {
    method: String,
    target: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// `(method, path, status, body)`; unmatched requests get a 404.
type Route = (&'static str, &'static str, u16, &'static str);

struct StubBackend {
    url: Url,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl StubBackend {
    async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let seen = Arc::clone(&seen);
                let routes = Arc::clone(&routes);
                tokio::spawn(async move { serve(socket, &routes, &seen).await });
            }
        });

        Self { url, requests }
    }

    fn backend(&self) -> Arc<HttpBackend> {
        Arc::new(HttpBackend::new(&self.url, Duration::from_secs(5)).unwrap())
    }

    fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }

    fn last(&self) -> Captured {
        self.requests().pop().expect("no request reached the stub")
    }
}

async fn serve(mut socket: TcpStream, routes: &[Route], seen: &Mutex<Vec<Captured>>) {
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    let path = request.target.split('?').next().unwrap_or_default();
    let (status, body) = routes
        .iter()
        .find(|(method, route, _, _)| *method == request.method && *route == path)
        .map(|(_, _, status, body)| (*status, *body))
        .unwrap_or((404, r#"{"detail":"Not Found"}"#));
    seen.lock().unwrap().push(request);

    let response = format!(
        "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Option<Captured> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let length: usize = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(0);
    let mut body = buf[head_end..].to_vec();
    while body.len() < length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(Captured {
        method,
        target,
        headers,
        body,
    })
}

#[tokio::test]
async fn test_list_sends_filters_and_limit_last() {
    let stub = StubBackend::start(vec![(
        "GET",
        "/api/actors",
        200,
        r#"[{"id":"a1","nom":"Alice","age":35,"nationalite":"Française"}]"#,
    )])
    .await;
    let backend = stub.backend();

    let mut filters = FilterSet::for_kind::<Actor>().with_limit(6);
    filters.set("nom", "Al é");
    filters.set("age_min", "30");
    filters.set("nationalite", "");
    let actors: Vec<Actor> = backend.list(&filters.to_query()).await.unwrap();

    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0].name, "Alice");
    assert_eq!(actors[0].age, Some(35));
    let request = stub.last();
    assert_eq!(request.method, "GET");
    assert_eq!(request.target, "/api/actors?age_min=30&nom=Al+%C3%A9&limit=6");

    let _: Vec<Actor> = backend.list(&ListQuery::all()).await.unwrap();
    assert_eq!(stub.last().target, "/api/actors");
}

#[tokio::test]
async fn test_get_maps_missing_record_to_none() {
    let stub = StubBackend::start(vec![(
        "GET",
        "/api/movies/m1",
        200,
        r#"{"id":"m1","nom":"La Môme","annee":2007,"photo_couverture":"/uploads/m1.jpg"}"#,
    )])
    .await;
    let backend = stub.backend();

    let movie: Movie = backend.get("m1").await.unwrap().expect("movie exists");
    assert_eq!(movie.year, Some(2007));
    assert_eq!(movie.cover_photo.as_deref(), Some("/uploads/m1.jpg"));

    let missing: Option<Actor> = backend.get("a/1").await.unwrap();
    assert_eq!(missing, None);
    assert_eq!(stub.last().target, "/api/actors/a%2F1");
}

#[tokio::test]
async fn test_create_and_update_send_wire_field_names() {
    let stub = StubBackend::start(vec![
        ("POST", "/api/movies", 200, r#"{"id":"m7"}"#),
        (
            "PUT",
            "/api/movies/m7",
            200,
            r#"{"id":"m7","nom":"The Artist","annee":2011,"genre":"Drame"}"#,
        ),
    ])
    .await;
    let backend = stub.backend();

    let draft = MovieDraft {
        year: Some(2011),
        genre: Some("Drame".to_string()),
        ..MovieDraft::named("The Artist")
    };
    let id = backend.create::<Movie>(&draft).await.unwrap();
    assert_eq!(id, "m7");
    let request = stub.last();
    assert_eq!(request.method, "POST");
    assert_eq!(request.header("content-type"), Some("application/json"));
    let body = request.json();
    assert_eq!(body["nom"], json!("The Artist"));
    assert_eq!(body["annee"], json!(2011));
    assert_eq!(body["genre"], json!("Drame"));

    let updated: Movie = backend.update("m7", &draft).await.unwrap();
    assert_eq!(updated.genre.as_deref(), Some("Drame"));
    assert_eq!(stub.last().method, "PUT");
}

#[tokio::test]
async fn test_not_found_and_error_statuses() {
    let stub = StubBackend::start(vec![
        ("DELETE", "/api/actors/a1", 500, "boom"),
        ("POST", "/api/actors", 422, r#"{"detail":"nom"}"#),
    ])
    .await;
    let backend = stub.backend();

    let result = backend.delete(RecordKind::Actor, "a1").await;
    assert!(matches!(
        result,
        Err(GatewayError::Status { status: 500, ref body }) if body == "boom"
    ));

    let result = backend.delete(RecordKind::Actor, "a2").await;
    assert!(matches!(result, Err(GatewayError::NotFound(ref id)) if id == "a2"));

    let result = backend.update::<Actor>("a2", &ActorDraft::named("X")).await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));

    let result = backend
        .upload_photo(RecordKind::Actor, "a2", PhotoUpload::jpeg(vec![0xFF]))
        .await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));

    let result = backend.create::<Actor>(&ActorDraft::named("X")).await;
    assert!(matches!(
        result,
        Err(GatewayError::Status { status: 422, .. })
    ));
}

#[tokio::test]
async fn test_photo_upload_is_single_file_multipart() {
    let stub = StubBackend::start(vec![(
        "POST",
        "/api/actors/a1/photo",
        200,
        r#"{"photo_url":"/uploads/actors/a1.jpg"}"#,
    )])
    .await;
    let backend = stub.backend();

    let path = backend
        .upload_photo(
            RecordKind::Actor,
            "a1",
            PhotoUpload::jpeg(vec![0xFF, 0xD8, 0xFF, 0xE0]),
        )
        .await
        .unwrap();
    assert_eq!(path, "/uploads/actors/a1.jpg");

    let request = stub.last();
    let content_type = request.header("content-type").unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    let body = String::from_utf8_lossy(&request.body);
    assert_eq!(body.matches("Content-Disposition").count(), 1);
    assert!(body.contains(r#"name="file"; filename="cropped-image.jpg""#));
    assert!(body.contains("Content-Type: image/jpeg"));
}

#[tokio::test]
async fn test_catalog_routes() {
    let stub = StubBackend::start(vec![
        ("GET", "/api/genres", 200, r#"{"genres":["Drame","Comédie"]}"#),
        ("GET", "/api/nationalities", 200, r#"{"nationalities":["Danoise"]}"#),
        (
            "GET",
            "/api/search",
            200,
            r#"{"actors":[],"movies":[{"id":"m1","nom":"Drunk","annee":2020}]}"#,
        ),
        (
            "GET",
            "/api/suggestions",
            200,
            r#"{"actors":[{"id":"a1","nom":"Omar Sy"}],"movies":[],"date":"2026-10-19"}"#,
        ),
    ])
    .await;
    let (service, catalog) = HttpCatalogService::new(8, stub.backend());
    let handle = tokio::spawn(service.run());

    assert_eq!(catalog.genres().await.unwrap(), vec!["Drame", "Comédie"]);
    assert_eq!(catalog.nationalities().await.unwrap(), vec!["Danoise"]);

    let found = catalog.search("drame noir".to_string()).await.unwrap();
    assert_eq!(found.movies[0].name, "Drunk");
    assert_eq!(stub.last().target, "/api/search?q=drame+noir");

    let suggestions = catalog.suggestions().await.unwrap();
    assert_eq!(suggestions.actors[0].name, "Omar Sy");
    assert_eq!(suggestions.date.to_string(), "2026-10-19");

    drop(catalog);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_connected_system_maps_errors_per_kind() {
    let stub = StubBackend::start(vec![
        ("POST", "/api/actors", 200, r#"{"id":"a1"}"#),
        (
            "POST",
            "/api/actors/a1/photo",
            200,
            r#"{"photo_url":"/uploads/actors/a1.jpg"}"#,
        ),
    ])
    .await;
    let config = Config {
        backend_url: Some(stub.url.clone()),
        offline: false,
        ..Config::offline()
    };
    let system = CatalogSystem::connect(&config).unwrap();

    let id = system
        .actors
        .create_actor(ActorDraft::named("Omar Sy"))
        .await
        .unwrap();
    let path = system
        .actors
        .upload_profile_photo(id, PhotoUpload::jpeg(vec![0xFF]))
        .await
        .unwrap();
    assert_eq!(path, "/uploads/actors/a1.jpg");

    let result = system.actors.delete("a9".to_string()).await;
    assert_eq!(result, Err(ActorError::NotFound("a9".to_string())));

    // Blank names never leave the process.
    let before = stub.requests().len();
    let result = system.actors.create_actor(ActorDraft::named(" ")).await;
    assert!(matches!(result, Err(ActorError::Validation(_))));
    assert_eq!(stub.requests().len(), before);

    system.shutdown().await.unwrap();
}
