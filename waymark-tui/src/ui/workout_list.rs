use crate::app::App;
use crate::ui::theme_colors;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use waymark_lib::{Workout, WorkoutDetails, WorkoutType};

pub fn render_workout_list(f: &mut Frame, app: &mut App, area: Rect) {
    let (running_color, cycling_color) = theme_colors(&app.service.config.theme);

    let list_items: Vec<ListItem> = app
        .service
        .workouts()
        .iter()
        .map(|workout| {
            let color = match workout.workout_type() {
                WorkoutType::Running => running_color,
                WorkoutType::Cycling => cycling_color,
            };
            workout_item(workout, color)
        })
        .collect();

    let list_block = Block::default()
        .borders(Borders::ALL)
        .title("Workouts")
        .border_style(Style::default().fg(Color::DarkGray));

    let list = List::new(list_items)
        .block(list_block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.workout_list_state);
}

fn workout_item(workout: &Workout, color: Color) -> ListItem<'static> {
    ListItem::new(workout_lines(workout, color))
}

// One list entry: a colored header line and one row per metric, each
// pairing an icon, a value and a unit.
fn workout_lines(workout: &Workout, color: Color) -> Vec<Line<'static>> {
    let header = Line::from(Span::styled(
        workout.description(),
        Style::default().fg(color).bold(),
    ));

    let details = match &workout.details {
        WorkoutDetails::Running {
            cadence,
            pace_min_per_km,
        } => Line::from(format!(
            "  🏃 {} km  ⏱ {} min  ⚡ {} min/km  🦶 {} spm",
            workout.distance_km, workout.duration_min, pace_min_per_km, cadence
        )),
        WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_kmh,
        } => Line::from(format!(
            "  🚴 {} km  ⏱ {} min  ⚡ {} km/h  ⛰ {} m",
            workout.distance_km, workout.duration_min, speed_kmh, elevation_gain_m
        )),
    };

    vec![header, details, Line::from("")]
}
