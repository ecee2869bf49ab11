use crate::{
    app::App,
    ui::{
        map_panel::render_map_panel, modals::render_modal, status_bar::render_status_bar,
        workout_list::render_workout_list,
    },
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

// Main UI rendering function
pub fn render_ui(f: &mut Frame, app: &mut App) {
    let size = f.size();

    // Create main layout: content above, status bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status Bar
        ])
        .split(size);

    render_main_content(f, app, main_chunks[0]);
    render_status_bar(f, app, main_chunks[1]);

    // Render modal last if active
    if app.active_modal != crate::app::ActiveModal::None {
        render_modal(f, app);
    }
}

// Sidebar with the workout list on the left, map on the right
fn render_main_content(f: &mut Frame, app: &mut App, area: Rect) {
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    render_workout_list(f, app, content_chunks[0]);
    render_map_panel(f, app, content_chunks[1]);
}

/// Helper function to create a centered rectangle for modals
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Like `centered_rect` but with a fixed size, clamped to the screen.
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let clamped_width = width.min(r.width);
    let clamped_height = height.min(r.height);

    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(r.height.saturating_sub(clamped_height) / 2),
            Constraint::Length(clamped_height),
            Constraint::Length(r.height.saturating_sub(clamped_height) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(r.width.saturating_sub(clamped_width) / 2),
            Constraint::Length(clamped_width),
            Constraint::Length(r.width.saturating_sub(clamped_width) / 2),
        ])
        .split(popup_layout[1])[1]
}
