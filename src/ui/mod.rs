//! UI module for rendering the TUI

mod certificates;
mod components;
mod files;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (tab_area, main_area, status_area) = layout::create_layout(area);

    layout::draw_tab_bar(frame, tab_area, app);

    match app.state.current_view {
        View::Certificates => certificates::draw(frame, main_area, app),
        View::Files => files::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // The menu overlays everything else, so it renders last.
    components::context_menu::draw(frame, app.active_menu(), area);
}
