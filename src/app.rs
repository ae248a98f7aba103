//! Application state and core logic

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::dispatch::{Dispatcher, EffectOutcome};
use crate::effects::{ClipboardSink, Navigator, SystemClipboard, SystemNavigator};
use crate::remote::ServerClientTrait;
use crate::state::actions::{resolve, OpenKind};
use crate::state::{
    Anchor, Announcer, AppState, ControlId, FeedbackState, MenuSession, UiArea, View,
};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Accessible status region shown in the status bar
    pub announcer: Announcer,
    /// Pending "Copied" label reverts
    pub feedback: FeedbackState,
    /// Server client shared with spawned effects
    server: Arc<dyn ServerClientTrait>,
    /// Executes menu actions
    dispatcher: Dispatcher,
    /// Settled effect results, drained every tick
    outcomes: mpsc::UnboundedReceiver<EffectOutcome>,
    /// One menu session per list surface
    cert_menu: MenuSession,
    file_menu: MenuSession,
    /// Terminal area of the last draw, for menu placement and hit testing
    pub last_area: Rect,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance and load the initial listings.
    pub async fn new(server: Arc<dyn ServerClientTrait>) -> Result<Self> {
        let mut app = Self::with_effects(
            server,
            Arc::new(SystemClipboard),
            Arc::new(SystemNavigator),
        );
        app.refresh().await;
        Ok(app)
    }

    /// Wire an app from its collaborator parts without touching the server.
    pub fn with_effects(
        server: Arc<dyn ServerClientTrait>,
        clipboard: Arc<dyn ClipboardSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (dispatcher, outcomes) = Dispatcher::new(Arc::clone(&server), clipboard, navigator);
        Self {
            state: AppState::default(),
            announcer: Announcer::default(),
            feedback: FeedbackState::default(),
            server,
            dispatcher,
            outcomes,
            cert_menu: MenuSession::new(resolve),
            file_menu: MenuSession::new(resolve),
            last_area: Rect::new(0, 0, 80, 24),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Re-fetch both listings and update the connection flag.
    pub async fn refresh(&mut self) {
        match self.server.list_certificates().await {
            Ok(rows) => {
                self.state.certificates = rows;
                self.state.server_connected = true;
            }
            Err(err) => {
                tracing::warn!("Certificate listing failed: {err:#}");
                self.state.server_connected = false;
            }
        }
        match self.server.list_files().await {
            Ok(rows) => self.state.files = rows,
            Err(err) => {
                tracing::warn!("File listing failed: {err:#}");
                self.state.server_connected = false;
            }
        }
        self.state.clamp_selection();
    }

    /// The menu instance owned by the current view.
    pub fn active_menu(&self) -> &MenuSession {
        match self.state.current_view {
            View::Certificates => &self.cert_menu,
            View::Files => &self.file_menu,
        }
    }

    fn active_menu_mut(&mut self) -> &mut MenuSession {
        match self.state.current_view {
            View::Certificates => &mut self.cert_menu,
            View::Files => &mut self.file_menu,
        }
    }

    /// Split borrow for dispatching into the active menu.
    fn dispatch_parts(&mut self) -> (&Dispatcher, &mut MenuSession) {
        let menu = match self.state.current_view {
            View::Certificates => &mut self.cert_menu,
            View::Files => &mut self.file_menu,
        };
        (&self.dispatcher, menu)
    }

    /// The copy control of the currently selected row.
    fn selected_control(&self) -> ControlId {
        ControlId {
            view: self.state.current_view,
            row: self.state.selected_row(),
        }
    }

    /// Apply settled effect outcomes. Called every tick; last write wins.
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcomes.try_recv() {
            outcome.apply(&mut self.announcer, &mut self.feedback);
        }
    }

    /// Expire announcer text and feedback labels. Called every tick.
    pub fn update_timers(&mut self) {
        self.announcer.update();
        self.feedback.update();
    }

    /// Handle key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.active_menu().is_open() {
            self.handle_menu_key(key);
            return Ok(());
        }
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Tab => self.toggle_view(),
            KeyCode::Char('1') => self.state.current_view = View::Certificates,
            KeyCode::Char('2') => self.state.current_view = View::Files,
            KeyCode::Up | KeyCode::Char('k') => self.state.select_prev_row(),
            KeyCode::Down | KeyCode::Char('j') => self.state.select_next_row(),
            KeyCode::Char('.') | KeyCode::Char('m') => self.open_menu_at_selection(),
            KeyCode::Char('c') => self.copy_selected_path(),
            KeyCode::Char('r') => self.refresh().await,
            _ => {}
        }
        Ok(())
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.active_menu_mut().close(),
            KeyCode::Up | KeyCode::Char('k') => self.active_menu_mut().select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.active_menu_mut().select_next(),
            KeyCode::Enter => {
                let control = self.selected_control();
                let (dispatcher, menu) = self.dispatch_parts();
                let index = menu.selected_index();
                dispatcher.dispatch(menu, index, control);
            }
            _ => {}
        }
    }

    /// Handle mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        let area = self.last_area;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.active_menu().is_open() {
                    let hit = self.active_menu().hit_entry(mouse.column, mouse.row, area);
                    let inside = self.active_menu().contains(mouse.column, mouse.row, area);
                    if let Some(index) = hit {
                        let control = self.selected_control();
                        let (dispatcher, menu) = self.dispatch_parts();
                        dispatcher.dispatch(menu, index, control);
                    } else if !inside {
                        // A press outside the rectangle closes without
                        // running any entry.
                        self.active_menu_mut().close();
                    }
                } else {
                    self.select_row_at(mouse.row);
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if self.select_row_at(mouse.row) {
                    self.open_menu((mouse.column, mouse.row));
                }
            }
            // The menu is modal: scrolling must not move the selection
            // out from under the bound record.
            MouseEventKind::ScrollUp if !self.active_menu().is_open() => {
                self.state.select_prev_row()
            }
            MouseEventKind::ScrollDown if !self.active_menu().is_open() => {
                self.state.select_next_row()
            }
            _ => {}
        }
        Ok(())
    }

    fn toggle_view(&mut self) {
        self.state.current_view = match self.state.current_view {
            View::Certificates => View::Files,
            View::Files => View::Certificates,
        };
    }

    /// Select the row under an absolute screen row, if there is one.
    fn select_row_at(&mut self, mouse_row: u16) -> bool {
        if !UiArea::ListContent.contains_row(mouse_row) {
            return false;
        }
        let index = UiArea::ListContent.relative_row(mouse_row) as usize;
        if index >= self.state.row_count() {
            return false;
        }
        match self.state.current_view {
            View::Certificates => self.state.selected_certificate = index,
            View::Files => self.state.selected_file = index,
        }
        true
    }

    /// Open the active menu for the selected row at an explicit anchor.
    fn open_menu(&mut self, anchor: Anchor) {
        let Some(record) = self.state.selected_record() else {
            return;
        };
        self.active_menu_mut().open(anchor, record);
    }

    /// Open the active menu anchored beside the selected row (keyboard
    /// trigger).
    fn open_menu_at_selection(&mut self) {
        let anchor_x = self.last_area.width / 3;
        let anchor_y = UiArea::ListContent.start_y() + self.state.selected_row() as u16;
        self.open_menu((anchor_x, anchor_y));
    }

    /// Copy the selected row's path without going through the menu.
    fn copy_selected_path(&mut self) {
        let Some(record) = self.state.selected_record() else {
            return;
        };
        let control = self.selected_control();
        if let Some(entry) = resolve(&record)
            .into_iter()
            .find(|e| e.kind == OpenKind::CopyPath && e.visible)
        {
            self.dispatcher.run(entry, control);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{MockClipboardSink, MockNavigator};
    use crate::remote::MockServerClientTrait;
    use crate::state::FileRow;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn file_row(name: &str) -> FileRow {
        FileRow {
            name: name.to_string(),
            is_dir: false,
            size: Some(1024),
            url: format!("/files/{name}"),
            download_url: format!("/files/{name}?download=1"),
            folder_url: String::new(),
            system_path: format!("/srv/files/{name}"),
            system_folder: "/srv/files".to_string(),
        }
    }

    fn test_app() -> App {
        test_app_with(
            MockServerClientTrait::new(),
            MockClipboardSink::new(),
            MockNavigator::new(),
        )
    }

    fn test_app_with(
        server: MockServerClientTrait,
        clipboard: MockClipboardSink,
        navigator: MockNavigator,
    ) -> App {
        let mut app =
            App::with_effects(Arc::new(server), Arc::new(clipboard), Arc::new(navigator));
        app.state.current_view = View::Files;
        app.state.files = vec![file_row("a.pem"), file_row("b.pem")];
        app.last_area = Rect::new(0, 0, 120, 40);
        app
    }

    impl App {
        /// Await one settled effect and apply it (test helper).
        async fn settle_one(&mut self) {
            let outcome = self.outcomes.recv().await.expect("an effect outcome");
            outcome.apply(&mut self.announcer, &mut self.feedback);
        }
    }

    #[tokio::test]
    async fn test_right_click_opens_menu_for_row_under_cursor() {
        let mut app = test_app();
        let row_y = UiArea::ListContent.start_y() + 1;
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 30, row_y))
            .unwrap();
        assert!(app.active_menu().is_open());
        assert_eq!(app.state.selected_row(), 1);
        let record = app.active_menu().record().unwrap();
        assert_eq!(record.navigate_url.as_deref(), Some("/files/b.pem"));
    }

    #[tokio::test]
    async fn test_right_click_outside_rows_opens_nothing() {
        let mut app = test_app();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 30, 1))
            .unwrap();
        assert!(!app.active_menu().is_open());
    }

    #[tokio::test]
    async fn test_outside_press_closes_menu_without_dispatch() {
        // No mock expectations anywhere: a dispatched effect would panic.
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('.'))).await.unwrap();
        assert!(app.active_menu().is_open());
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0))
            .unwrap();
        assert!(!app.active_menu().is_open());
    }

    #[tokio::test]
    async fn test_escape_closes_menu() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('.'))).await.unwrap();
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(!app.active_menu().is_open());
    }

    #[tokio::test]
    async fn test_menu_enter_dispatches_selected_entry() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_open_url()
            .withf(|url| url == "/files/a.pem")
            .times(1)
            .returning(|_| Ok(()));
        let mut app = test_app_with(
            MockServerClientTrait::new(),
            MockClipboardSink::new(),
            navigator,
        );
        app.handle_key(key(KeyCode::Char('.'))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(!app.active_menu().is_open());
    }

    #[tokio::test]
    async fn test_click_on_entry_dispatches_it() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_open_url()
            .withf(|url| url == "/files/a.pem?download=1")
            .times(1)
            .returning(|_| Ok(()));
        let mut app = test_app_with(
            MockServerClientTrait::new(),
            MockClipboardSink::new(),
            navigator,
        );
        app.handle_key(key(KeyCode::Char('.'))).await.unwrap();
        let rect = app.active_menu().rect(app.last_area);
        // Second visible entry is Download.
        app.handle_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            rect.x + 1,
            rect.y + 2,
        ))
        .unwrap();
        assert!(!app.active_menu().is_open());
    }

    #[tokio::test]
    async fn test_direct_copy_marks_control_and_announces() {
        let mut clipboard = MockClipboardSink::new();
        clipboard
            .expect_set_text()
            .withf(|text| text == "/srv/files/a.pem")
            .times(1)
            .returning(|_| Ok(()));
        let mut app = test_app_with(
            MockServerClientTrait::new(),
            clipboard,
            MockNavigator::new(),
        );
        app.handle_key(key(KeyCode::Char('c'))).await.unwrap();
        app.settle_one().await;
        assert_eq!(app.announcer.current(), Some(crate::dispatch::COPY_OK));
        assert!(app.feedback.is_copied(ControlId {
            view: View::Files,
            row: 0
        }));
    }

    #[tokio::test]
    async fn test_menu_is_modal_while_open() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('.'))).await.unwrap();
        // View switching and row movement are blocked while the menu is up.
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(app.state.current_view, View::Files);
        assert!(app.active_menu().is_open());
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 0, 0))
            .unwrap();
        assert_eq!(app.state.selected_row(), 0);
        // Escape releases it.
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(app.state.current_view, View::Certificates);
    }

    #[tokio::test]
    async fn test_refresh_failure_marks_disconnected() {
        let mut server = MockServerClientTrait::new();
        server
            .expect_list_certificates()
            .returning(|| Err(anyhow::anyhow!("connection refused")));
        server
            .expect_list_files()
            .returning(|| Err(anyhow::anyhow!("connection refused")));
        let mut app = test_app_with(server, MockClipboardSink::new(), MockNavigator::new());
        app.refresh().await;
        assert!(!app.state.server_connected);
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut app = test_app();
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
        assert!(app.should_quit());
    }
}
