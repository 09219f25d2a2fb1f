//! Main application struct and run loop.
//!
//! This module provides the [`App`] struct which orchestrates the viewer:
//! it maps messages to navigation, keeps the open page's views, and renders
//! them every frame from the latest query states.

use std::sync::Arc;
use std::time::Duration;

use kanban_api::ApiClient;
use kanban_protocol::Message;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tracing::{debug, info};

use crate::{
    AppState, Route,
    event::{event_to_message, poll_event},
    layout::{HEADER_HEIGHT, MIN_HEIGHT, MIN_HEIGHT_WITH_CHROME, MIN_WIDTH, STATUS_BAR_HEIGHT},
    terminal::AppTerminal,
    views::{BoardListView, BoardPageView, ColumnContent, ColumnView},
    widgets::{
        render_board, render_board_list, render_help_overlay, render_outcome, render_status_bar,
    },
};

/// Pause between frames.
///
/// Requests progress on the runtime while the loop sleeps.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Title shown in the header.
pub const APP_TITLE: &str = "Kanban Board App";

/// The views of the screen being shown.
#[derive(Debug)]
enum Page {
    BoardList(BoardListView),
    Board(BoardPageView),
}

impl Page {
    fn open(client: &ApiClient, route: &Route) -> Self {
        match route {
            Route::BoardList => Self::BoardList(BoardListView::new(client)),
            Route::BoardDetail { board_id } => {
                Self::Board(BoardPageView::new(client, board_id.as_deref()))
            }
        }
    }

    fn refresh(&mut self, client: &ApiClient) {
        match self {
            Self::BoardList(view) => view.refresh(client),
            Self::Board(view) => view.refresh(client),
        }
    }
}

/// The main application struct.
///
/// Manages navigation state and the open page, and provides the main
/// event loop.
#[derive(Debug)]
pub struct App {
    client: Arc<ApiClient>,
    state: AppState,
    page: Page,
    should_quit: bool,
    /// Whether the header and status bar were shown in the last render.
    header_visible: bool,
}

impl App {
    /// Creates the application showing `route`.
    ///
    /// Opening a page issues its queries, so this must run inside a Tokio
    /// runtime.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use kanban_api::ApiClient;
    /// use kanban_tui::{App, Route};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> anyhow::Result<()> {
    /// let client = Arc::new(ApiClient::new("http://localhost:8080/api")?);
    /// let app = App::new(client, Route::parse("/boards/b1"));
    /// assert_eq!(app.state().route, Route::board("b1"));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn new(client: Arc<ApiClient>, route: Route) -> Self {
        let page = Page::open(&client, &route);
        Self {
            client,
            state: AppState::new(route),
            page,
            should_quit: false,
            header_visible: true,
        }
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns `true` if the last frame had room for the header and status
    /// bar.
    #[must_use]
    pub fn chrome_visible(&self) -> bool {
        self.header_visible
    }

    /// Updates the application state based on a message.
    ///
    /// When the help overlay is visible, any message other than `Quit` and
    /// `ToggleHelp` only dismisses it.
    pub fn update(&mut self, msg: Message) {
        if self.state.help_visible {
            match msg {
                Message::Quit => self.should_quit = true,
                Message::ToggleHelp => self.state.toggle_help(),
                _ => {
                    let _ = self.state.dismiss_help();
                }
            }
            return;
        }

        self.sync();

        match msg {
            Message::Quit => self.should_quit = true,
            Message::ToggleHelp => self.state.toggle_help(),
            Message::Refresh => {
                debug!(route = %self.state.route, "refresh requested");
                self.page.refresh(&self.client);
            }
            Message::Escape if self.state.selected_task.is_some() => {
                self.state.clear_selection();
            }
            Message::Back | Message::Escape => self.go_back(),
            Message::Select => {
                if let Page::BoardList(view) = &self.page
                    && let Some(route) = view.link(self.state.selected_board)
                {
                    self.navigate_to(route);
                }
            }
            Message::NavigateUp
            | Message::NavigateDown
            | Message::NavigateLeft
            | Message::NavigateRight => self.move_selection(&msg),
        }
    }

    fn move_selection(&mut self, msg: &Message) {
        match &mut self.page {
            Page::BoardList(view) => match msg {
                Message::NavigateUp => self.state.select_previous_board(view.len()),
                Message::NavigateDown => self.state.select_next_board(view.len()),
                _ => {}
            },
            Page::Board(view) => {
                let column_count = view.column_count();
                let task_count = view
                    .columns_mut()
                    .get_mut(self.state.selected_column)
                    .map_or(0, ColumnView::task_count);
                match msg {
                    Message::NavigateLeft => self.state.navigate_left(column_count),
                    Message::NavigateRight => self.state.navigate_right(column_count),
                    Message::NavigateUp => self.state.navigate_up(task_count),
                    Message::NavigateDown => self.state.navigate_down(task_count),
                    _ => {}
                }
            }
        }
    }

    fn navigate_to(&mut self, route: Route) {
        info!(from = %self.state.route, to = %route, "navigating");
        self.state.navigate_to(route);
        self.page = Page::open(&self.client, &self.state.route);
    }

    fn go_back(&mut self) {
        if self.state.go_back() {
            info!(to = %self.state.route, "navigating back");
            self.page = Page::open(&self.client, &self.state.route);
        }
    }

    /// Brings the page in line with its queries and clamps the selection to
    /// what the page now shows.
    fn sync(&mut self) {
        match &mut self.page {
            // A reload in flight keeps the highlight where it was.
            Page::BoardList(view) if view.state().is_success() => {
                self.state.clamp_board_selection(view.len());
            }
            Page::BoardList(_) => {}
            Page::Board(view) => {
                view.sync(&self.client);
                let column_count = view.column_count();
                let focused = self.state.selected_column.min(column_count.saturating_sub(1));
                let task_count = view
                    .columns_mut()
                    .get_mut(focused)
                    .map_or(0, ColumnView::task_count);
                self.state
                    .clamp_board_page_selection(column_count, task_count);
            }
        }
    }

    /// Renders the current state to the frame.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.header_visible = false;
            render_terminal_too_small(frame, area);
            return;
        }

        // Between the two minimums, header and status bar give way to content.
        let show_chrome = area.height >= MIN_HEIGHT_WITH_CHROME;
        self.header_visible = show_chrome;

        let content_area = if show_chrome {
            let [header_area, content_area, status_area] = Layout::vertical([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .areas(area);
            render_header(frame, header_area);
            render_status_bar(&self.state.route, status_area, frame.buffer_mut());
            content_area
        } else {
            area
        };

        self.sync();
        self.render_page(content_area, frame.buffer_mut());

        if self.state.help_visible {
            render_help_overlay(area, frame.buffer_mut());
        }
    }

    fn render_page(&mut self, area: Rect, buf: &mut Buffer) {
        let state = &self.state;
        match &mut self.page {
            Page::BoardList(view) => {
                let boards = view.state();
                render_outcome(boards.project(), area, buf, |boards, area, buf| {
                    render_board_list(boards, state.selected_board, area, buf);
                });
            }
            Page::Board(view) => {
                let board = view.state();
                let columns: Vec<ColumnContent<'_>> =
                    view.columns_mut().iter_mut().map(ColumnView::content).collect();
                render_outcome(board.project(), area, buf, |board, area, buf| {
                    render_board(
                        &board.name,
                        &columns,
                        state.selected_column,
                        state.selected_task,
                        area,
                        buf,
                    );
                });
            }
        }
    }

    /// Runs the main application loop until the user quits.
    ///
    /// Each iteration draws a frame, drains pending terminal events without
    /// blocking, then sleeps for [`FRAME_INTERVAL`] so spawned requests can
    /// make progress on the same runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        info!(route = %self.state.route, "viewer started");

        loop {
            terminal.draw(|frame| self.view(frame))?;

            while let Some(event) = poll_event(Duration::ZERO)? {
                if let Some(msg) = event_to_message(&event) {
                    self.update(msg);
                }
            }

            if self.should_quit {
                break;
            }

            tokio::time::sleep(FRAME_INTERVAL).await;
        }

        info!("viewer stopped");
        Ok(())
    }
}

/// Renders a message indicating the terminal is too small.
fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    let vertical_offset = area.height.saturating_sub(2) / 2;
    let centered_area = Rect {
        x: area.x,
        y: area.y + vertical_offset,
        width: area.width,
        height: area.height.saturating_sub(vertical_offset),
    };

    frame.render_widget(paragraph, centered_area);
}

/// Renders the header bar with title and help cue.
fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [title_area, help_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(17), // "Press ? for help" = 16 chars + padding
    ])
    .areas(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        APP_TITLE,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, title_area);

    let help_cue = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" for help", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(help_cue, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use kanban_protocol::sample;
    use ratatui::{Terminal, backend::TestBackend};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve_boards() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/boards"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(vec![sample::sprint_board(), sample::release_board()]),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/boards/b1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample::sprint_board()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/boards/b2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample::release_board()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json({
                let mut tasks = sample::sprint_tasks();
                tasks.extend(sample::release_tasks());
                tasks
            }))
            .mount(&server)
            .await;
        server
    }

    fn client_for(server: &MockServer) -> Arc<ApiClient> {
        Arc::new(ApiClient::new(&format!("{}/api", server.uri())).expect("valid base url"))
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    async fn settle(client: &ApiClient) {
        client.get_boards().settled().await;
        client.get_tasks().settled().await;
    }

    #[tokio::test]
    async fn quit_message_sets_should_quit() {
        let server = serve_boards().await;
        let mut app = App::new(client_for(&server), Route::BoardList);

        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn toggle_help_shows_and_hides() {
        let server = serve_boards().await;
        let mut app = App::new(client_for(&server), Route::BoardList);

        app.update(Message::ToggleHelp);
        assert!(app.state().help_visible);
        app.update(Message::ToggleHelp);
        assert!(!app.state().help_visible);
    }

    #[tokio::test]
    async fn help_blocks_navigation() {
        let server = serve_boards().await;
        let client = client_for(&server);
        client.get_boards().settled().await;
        let mut app = App::new(client, Route::BoardList);

        app.update(Message::ToggleHelp);
        app.update(Message::NavigateDown);

        assert!(!app.state().help_visible);
        assert_eq!(app.state().selected_board, 0);
    }

    #[tokio::test]
    async fn quit_works_with_help_visible() {
        let server = serve_boards().await;
        let mut app = App::new(client_for(&server), Route::BoardList);

        app.update(Message::ToggleHelp);
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn board_list_shows_loading_then_links() {
        let server = serve_boards().await;
        let client = client_for(&server);
        let mut app = App::new(Arc::clone(&client), Route::BoardList);

        let first = draw(&mut app, 80, 20);
        assert!(first.contains(APP_TITLE));

        client.get_boards().settled().await;
        let output = draw(&mut app, 80, 20);
        assert!(output.contains("> Sprint"));
        assert!(output.contains("Release 1.0"));
        assert!(!output.contains("Loading..."));
    }

    #[tokio::test]
    async fn select_opens_board_and_back_returns() {
        let server = serve_boards().await;
        let client = client_for(&server);
        client.get_boards().settled().await;
        let mut app = App::new(Arc::clone(&client), Route::BoardList);

        app.update(Message::NavigateDown);
        app.update(Message::Select);
        assert_eq!(app.state().route, Route::board("b2"));

        client.get_board_by_id("b2").settled().await;
        settle(&client).await;
        let output = draw(&mut app, 90, 24);
        assert!(output.contains("Release 1.0"));
        assert!(output.contains("To Do (2)"));
        assert!(output.contains("/boards/b2"));

        app.update(Message::Back);
        assert_eq!(app.state().route, Route::BoardList);
        assert_eq!(app.state().selected_board, 1);
    }

    #[tokio::test]
    async fn column_and_task_navigation_on_board_page() {
        let server = serve_boards().await;
        let client = client_for(&server);
        client.get_board_by_id("b2").settled().await;
        settle(&client).await;
        let mut app = App::new(Arc::clone(&client), Route::board("b2"));

        app.update(Message::NavigateRight);
        assert_eq!(app.state().selected_column, 1);

        app.update(Message::NavigateDown);
        assert_eq!(app.state().selected_task, Some(0));

        app.update(Message::Escape);
        assert_eq!(app.state().selected_task, None);

        app.update(Message::NavigateLeft);
        app.update(Message::NavigateLeft);
        assert_eq!(app.state().selected_column, 2);
    }

    #[tokio::test]
    async fn missing_board_id_renders_error() {
        let server = serve_boards().await;
        let mut app = App::new(
            client_for(&server),
            Route::BoardDetail { board_id: None },
        );

        let output = draw(&mut app, 80, 20);
        assert!(output.contains("Error: missing required parameter: boardId"));
    }

    #[tokio::test]
    async fn view_shows_too_small_message() {
        let server = serve_boards().await;
        let mut app = App::new(client_for(&server), Route::BoardList);

        let short = draw(&mut app, 80, MIN_HEIGHT - 1);
        assert!(short.contains("Terminal too small"));
        assert!(!app.header_visible);

        let narrow = draw(&mut app, MIN_WIDTH - 1, 24);
        assert!(narrow.contains("Terminal"));
        assert!(!app.header_visible);
    }

    #[tokio::test]
    async fn view_hides_chrome_in_compact_mode() {
        let server = serve_boards().await;
        let client = client_for(&server);
        client.get_boards().settled().await;
        let mut app = App::new(client, Route::BoardList);

        let compact = draw(&mut app, 80, MIN_HEIGHT);
        assert!(!app.header_visible);
        assert!(!compact.contains(APP_TITLE));
        assert!(compact.contains("Sprint"));

        let full = draw(&mut app, 80, MIN_HEIGHT_WITH_CHROME);
        assert!(app.header_visible);
        assert!(full.contains(APP_TITLE));
        assert!(full.contains("Press ? for help"));
    }

    #[tokio::test]
    async fn help_overlay_renders_over_page() {
        let server = serve_boards().await;
        let mut app = App::new(client_for(&server), Route::BoardList);

        app.update(Message::ToggleHelp);
        let output = draw(&mut app, 80, 24);
        assert!(output.contains("Navigation"));
        assert!(output.contains("Press any key to close"));
    }

    #[tokio::test]
    async fn refresh_reissues_board_list_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/boards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![sample::sprint_board()]))
            .expect(2)
            .mount(&server)
            .await;
        let client = client_for(&server);
        client.get_boards().settled().await;
        let mut app = App::new(Arc::clone(&client), Route::BoardList);

        app.update(Message::Refresh);
        client.get_boards().settled().await;

        server.verify().await;
    }
}
