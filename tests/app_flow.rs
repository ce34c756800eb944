//! End-to-end coordinator behavior against a mock HTTP server.
//!
//! Each test drives the [`App`] the way the event loop does: mutate the
//! (resource, page, search) triple, then drain fetch outcomes until the
//! request settles.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mortui::api::{ApiClient, Page, PageInfo};
use mortui::app::App;
use mortui::resource::ResourceKind;

fn page_body(pages: u32, names: &[&str]) -> serde_json::Value {
    json!({
        "info": {"count": names.len() * (pages as usize), "pages": pages, "next": null, "prev": null},
        "results": names
            .iter()
            .map(|name| json!({"id": 1, "name": name, "status": "Alive"}))
            .collect::<Vec<_>>()
    })
}

/// App seeded with an already-applied dataset, as after a successful
/// startup fetch.
fn seeded_app(server: &MockServer, pages: u32) -> App {
    let client = ApiClient::new(&server.uri()).unwrap();
    let seed = Page {
        info: PageInfo {
            count: (pages as u64) * 20,
            pages,
            next: None,
            prev: None,
        },
        results: vec![json!({"id": 0, "name": "Seed"})],
    };
    App::from_initialized(client, Ok(seed))
}

/// Drain outcomes until the in-flight fetch settles.
async fn settle(app: &mut App) {
    for _ in 0..200 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        app.poll_outcomes();
        if !app.loading {
            return;
        }
    }
    panic!("fetch did not settle in time");
}

fn first_name(app: &App) -> String {
    let page = app.data.as_ref().expect("app should hold data");
    page.results[0]["name"].as_str().unwrap_or("").to_string()
}

#[tokio::test]
async fn refresh_populates_from_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(42, &["Rick Sanchez"])))
        .mount(&server)
        .await;

    let mut app = seeded_app(&server, 42);
    app.refresh();
    settle(&mut app).await;

    assert!(!app.in_error_state());
    assert_eq!(app.total_pages(), 42);
    assert_eq!(first_name(&app), "Rick Sanchez");
}

#[tokio::test]
async fn switching_resources_fetches_page_one_of_the_new_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/location"))
        .and(query_param("page", "1"))
        .and(query_param_is_missing("name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(7, &["Citadel of Ricks"])))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = seeded_app(&server, 42);
    app.page = 5;
    app.search = "rick".to_string();

    app.switch_resource(ResourceKind::Location);
    settle(&mut app).await;

    assert_eq!(app.kind, ResourceKind::Location);
    assert_eq!(app.page, 1);
    assert!(app.search.is_empty(), "switch must clear the search term");
    assert_eq!(first_name(&app), "Citadel of Ricks");
}

#[tokio::test]
async fn applying_a_search_fetches_page_one_of_the_filtered_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("page", "1"))
        .and(query_param("name", "summer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, &["Summer Smith"])))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = seeded_app(&server, 42);
    app.page = 9;
    app.search_input = "summer".to_string();

    app.apply_search();
    settle(&mut app).await;

    assert_eq!(app.page, 1);
    assert_eq!(first_name(&app), "Summer Smith");
}

#[tokio::test]
async fn a_failed_fetch_shows_the_error_view_and_clears_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut app = seeded_app(&server, 42);
    app.next_page();
    settle(&mut app).await;

    assert!(app.in_error_state());
    assert!(app.data.is_none(), "failed fetch must clear the dataset");
    assert_eq!(app.result_count(), 0);
    let message = app.error_message.as_deref().unwrap();
    assert!(message.contains("500"), "got: {message}");
}

#[tokio::test]
async fn retry_reissues_the_identical_request() {
    let server = MockServer::start().await;
    // First hit fails, the retry succeeds.
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(42, &["Rick Sanchez"])))
        .mount(&server)
        .await;

    let mut app = seeded_app(&server, 42);
    app.go_to_page(3);
    settle(&mut app).await;
    assert!(app.in_error_state());
    assert_eq!(app.page, 3);

    app.retry();
    settle(&mut app).await;

    assert!(!app.in_error_state());
    assert_eq!(app.page, 3, "retry must not move the page");
    assert_eq!(first_name(&app), "Rick Sanchez");
}

#[tokio::test]
async fn empty_search_results_are_a_state_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("name", "flurbo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"info": {"count": 0, "pages": 0}, "results": []})),
        )
        .mount(&server)
        .await;

    let mut app = seeded_app(&server, 42);
    app.search_input = "flurbo".to_string();
    app.apply_search();
    settle(&mut app).await;

    assert!(!app.in_error_state());
    assert!(app.data.is_some());
    assert_eq!(app.result_count(), 0);
}

#[tokio::test]
async fn a_superseded_fetch_never_overwrites_newer_data() {
    let server = MockServer::start().await;
    // Page 1 answers slowly, page 2 immediately. The page 1 response lands
    // after page 2 was applied and must be dropped.
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(42, &["Slow Rick"]))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(42, &["Fast Morty"])))
        .mount(&server)
        .await;

    let mut app = seeded_app(&server, 42);
    app.refresh();
    app.next_page();
    settle(&mut app).await;

    assert_eq!(app.page, 2);
    assert_eq!(first_name(&app), "Fast Morty");

    // Let the slow page 1 response arrive.
    tokio::time::sleep(Duration::from_millis(500)).await;
    app.poll_outcomes();

    assert_eq!(
        first_name(&app),
        "Fast Morty",
        "stale response must not replace newer data"
    );
    assert!(!app.loading);
}

#[tokio::test]
async fn out_of_range_page_jumps_are_clamped_before_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/character"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(3, &["Rick Sanchez"])))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = seeded_app(&server, 3);
    app.go_to_page(99);
    settle(&mut app).await;

    assert_eq!(app.page, 3);
    assert!(!app.in_error_state());
}
