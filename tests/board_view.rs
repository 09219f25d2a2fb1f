//! End-to-end rendering of a board served over HTTP.

use std::sync::Arc;

use kanban_api::ApiClient;
use kanban_protocol::{Message, sample};
use kanban_tui::{App, Route};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn buffer_to_string(buf: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            if let Some(cell) = buf.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        result.push('\n');
    }
    result
}

fn draw(app: &mut App) -> String {
    draw_sized(app, 80, 30)
}

fn draw_sized(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| app.view(frame)).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

async fn serve_sprint() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/boards/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample::sprint_board()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample::sprint_tasks()))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(&format!("{}/api", server.uri())).unwrap())
}

#[tokio::test]
async fn sprint_board_renders_newest_deadline_first() {
    let server = serve_sprint().await;
    let client = client_for(&server);
    let mut app = App::new(Arc::clone(&client), Route::parse("/boards/b1"));

    client.get_board_by_id("b1").settled().await;
    // The first frame creates the column views, which ask for tasks.
    draw(&mut app);
    client.get_tasks().settled().await;

    let output = draw(&mut app);
    let lines: Vec<&str> = output.lines().collect();
    let line_of = |needle: &str| {
        lines
            .iter()
            .position(|line| line.contains(needle))
            .unwrap_or_else(|| panic!("{needle:?} not rendered:\n{output}"))
    };

    assert!(line_of("Kanban Board App") < line_of("Sprint"));
    assert!(line_of("Sprint") < line_of("Todo (2)"));
    assert!(line_of("Review") < line_of("Write spec"));
    assert_eq!(output.matches("Deadline:").count(), 2);
    assert!(!output.contains("Deadline: 300"));

    // Frames re-read the shared cache instead of refetching.
    draw(&mut app);
    server.verify().await;
}

#[tokio::test]
async fn failed_board_renders_error_in_place_of_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/boards/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let client = client_for(&server);
    let mut app = App::new(Arc::clone(&client), Route::board("missing"));

    client.get_board_by_id("missing").settled().await;
    let output = draw(&mut app);

    assert!(output.contains("Error 404: Unknown Error"));
    assert!(!output.contains("Loading..."));
}

#[tokio::test]
async fn tasks_failure_is_shown_in_every_column() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/boards/b2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample::release_board()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "database unavailable"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);
    let mut app = App::new(Arc::clone(&client), Route::board("b2"));

    client.get_board_by_id("b2").settled().await;
    draw_sized(&mut app, 120, 30);
    // Joins the request the columns started.
    let mut tasks = client.get_tasks();
    assert!(tasks.settled().await.is_error());

    let output = draw_sized(&mut app, 120, 30);
    assert!(output.contains("Release 1.0"), "{output}");
    for column in ["To Do", "In Progress", "Done"] {
        assert!(output.contains(column), "{column:?} not rendered:\n{output}");
    }
    assert_eq!(output.matches("Error 500: database unavailable").count(), 3, "{output}");
    assert!(!output.contains("Loading..."));

    // One shared request for all three columns.
    server.verify().await;
}

#[tokio::test]
async fn navigating_from_list_to_board_and_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/boards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![sample::sprint_board()]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/boards/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample::sprint_board()))
        .mount(&server)
        .await;
    let client = client_for(&server);
    let mut app = App::new(Arc::clone(&client), Route::BoardList);

    client.get_boards().settled().await;
    assert!(draw(&mut app).contains("> Sprint"));

    app.update(Message::Select);
    assert_eq!(app.state().route, Route::board("b1"));

    app.update(Message::Back);
    assert_eq!(app.state().route, Route::BoardList);

    // The list comes back from the cache without another request.
    assert!(draw(&mut app).contains("> Sprint"));
    server.verify().await;
}
