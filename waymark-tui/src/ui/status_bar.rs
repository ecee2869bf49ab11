use crate::app::{ActiveModal, App};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.active_modal {
        ActiveModal::None => {
            "[Click] New Workout | [↑↓←→/hjkl] Pan | [+/-] Zoom | [?] Help | [Q]uit ".to_string()
        }
        ActiveModal::Help => " [Esc/Enter/?] Close Help ".to_string(),
        ActiveModal::WorkoutForm { .. } => {
            " [Esc] Cancel | [Enter] Confirm/Next | [Tab/↑↓] Navigate | [Space/←→] Type "
                .to_string()
        }
    };

    let error_text = app.last_error.as_deref().unwrap_or("");

    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(80), Constraint::Percentage(20)])
        .split(area);

    let status_paragraph =
        Paragraph::new(status_text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status_paragraph, status_chunks[0]);

    let error_paragraph = Paragraph::new(error_text)
        .style(Style::default().bg(Color::DarkGray).fg(Color::Red))
        .alignment(ratatui::layout::Alignment::Right);
    f.render_widget(error_paragraph, status_chunks[1]);
}
