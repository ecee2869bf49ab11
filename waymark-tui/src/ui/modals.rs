use crate::{
    app::{ActiveModal, App, MetricRow, WorkoutField},
    ui::layout::{centered_rect, centered_rect_fixed},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use waymark_lib::WorkoutType;

pub fn render_modal(f: &mut Frame, app: &mut App) {
    if matches!(app.active_modal, ActiveModal::Help) {
        render_help_modal(f);
    } else if matches!(app.active_modal, ActiveModal::WorkoutForm { .. }) {
        render_workout_form_modal(f, app);
    }
}

fn render_help_modal(f: &mut Frame) {
    let block = Block::default()
        .title("Help (?)")
        .borders(Borders::ALL)
        .title_style(Style::new().bold())
        .border_style(Style::new().yellow());
    let area = centered_rect(60, 70, f.size());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let help_text = vec![
        Line::from("--- Global ---").style(Style::new().bold().underlined()),
        Line::from(" Q: Quit Application"),
        Line::from(" ?: Show/Hide This Help"),
        Line::from(""),
        Line::from("--- Map ---").style(Style::new().bold().underlined()),
        Line::from(" Click: Record Workout At That Point"),
        Line::from(" ↑↓←→ / hjkl: Pan"),
        Line::from(" + / -: Zoom In/Out"),
        Line::from(" Scroll Wheel: Zoom (over the map)"),
        Line::from(""),
        Line::from("--- Workout Form ---").style(Style::new().bold().underlined()),
        Line::from(" Space / ←→: Switch Running/Cycling (on Type)"),
        Line::from(" Tab / Shift+Tab: Next/Previous Field"),
        Line::from(" Enter: Confirm Field / Press Button"),
        Line::from(" Esc: Cancel"),
        Line::from(""),
        Line::from(Span::styled(
            " Press Esc, ?, or Enter to close ",
            Style::new().italic().yellow(),
        )),
    ];

    let paragraph = Paragraph::new(help_text).wrap(Wrap { trim: false });
    f.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn render_workout_form_modal(f: &mut Frame, app: &mut App) {
    let has_error = matches!(
        &app.active_modal,
        ActiveModal::WorkoutForm {
            error_message: Some(_),
            ..
        }
    );

    // --- Calculate Fixed Height ---
    let mut required_height = 2; // Top/Bottom border
    required_height += 1; // Type label
    required_height += 1; // Type options
    required_height += 1; // Distance label
    required_height += 1; // Distance input
    required_height += 1; // Duration label
    required_height += 1; // Duration input
    required_height += 1; // Metric label
    required_height += 1; // Metric input
    required_height += 1; // Spacer
    required_height += 1; // Buttons row
    if has_error {
        required_height += 1; // Error message line
    }

    let fixed_width = 44;
    let area = centered_rect_fixed(fixed_width, required_height, f.size());
    // Remembered so clicks on the form are not taken for map clicks.
    app.modal_area = area;

    if let ActiveModal::WorkoutForm {
        workout_type,
        distance_input,
        duration_input,
        cadence_input,
        elevation_input,
        metric_row,
        focused_field,
        error_message,
    } = &app.active_modal
    {
        let block = Block::default()
            .title("Record Workout")
            .borders(Borders::ALL)
            .border_style(Style::new().yellow());

        f.render_widget(Clear, area);
        f.render_widget(block, area);

        let inner_area = area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        });

        let mut constraints = vec![
            Constraint::Length(1), // Type label
            Constraint::Length(1), // Type options
            Constraint::Length(1), // Distance label
            Constraint::Length(1), // Distance input
            Constraint::Length(1), // Duration label
            Constraint::Length(1), // Duration input
            Constraint::Length(1), // Metric label
            Constraint::Length(1), // Metric input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons row
        ];
        if error_message.is_some() {
            constraints.push(Constraint::Length(1)); // Error Message
        }
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner_area);

        let base_input_style = Style::default().fg(Color::White);
        let base_button_style = Style::default().fg(Color::White);
        let input_margin = Margin {
            vertical: 0,
            horizontal: 1,
        };

        // Row 1: Type selector
        f.render_widget(Paragraph::new("Type:"), chunks[0]);
        let type_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let running_style = type_option_style(
            *workout_type == WorkoutType::Running,
            *focused_field == WorkoutField::Type,
            base_button_style,
        );
        f.render_widget(
            Paragraph::new(" Running ")
                .alignment(ratatui::layout::Alignment::Center)
                .style(running_style),
            type_layout[0],
        );
        let cycling_style = type_option_style(
            *workout_type == WorkoutType::Cycling,
            *focused_field == WorkoutField::Type,
            base_button_style,
        );
        f.render_widget(
            Paragraph::new(" Cycling ")
                .alignment(ratatui::layout::Alignment::Center)
                .style(cycling_style),
            type_layout[1],
        );

        // Row 2: Distance
        f.render_widget(Paragraph::new("Distance (km):"), chunks[2]);
        let distance_style = if *focused_field == WorkoutField::Distance {
            base_input_style.reversed()
        } else {
            base_input_style
        };
        f.render_widget(
            Paragraph::new(distance_input.as_str()).style(distance_style),
            chunks[3].inner(&input_margin),
        );

        // Row 3: Duration
        f.render_widget(Paragraph::new("Duration (min):"), chunks[4]);
        let duration_style = if *focused_field == WorkoutField::Duration {
            base_input_style.reversed()
        } else {
            base_input_style
        };
        f.render_widget(
            Paragraph::new(duration_input.as_str()).style(duration_style),
            chunks[5].inner(&input_margin),
        );

        // Row 4: the one visible metric row
        let (metric_label, metric_input) = match metric_row {
            MetricRow::Cadence => ("Cadence (step/min):", cadence_input),
            MetricRow::Elevation => ("Elev Gain (meters):", elevation_input),
        };
        f.render_widget(Paragraph::new(metric_label), chunks[6]);
        let metric_style = if *focused_field == WorkoutField::Metric {
            base_input_style.reversed()
        } else {
            base_input_style
        };
        f.render_widget(
            Paragraph::new(metric_input.as_str()).style(metric_style),
            chunks[7].inner(&input_margin),
        );

        // Row 5: Buttons
        let button_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[9]);

        let ok_button = Paragraph::new(" OK ")
            .alignment(ratatui::layout::Alignment::Center)
            .style(if *focused_field == WorkoutField::Confirm {
                base_button_style.reversed()
            } else {
                base_button_style
            });
        f.render_widget(ok_button, button_layout[0]);

        let cancel_button = Paragraph::new(" Cancel ")
            .alignment(ratatui::layout::Alignment::Center)
            .style(if *focused_field == WorkoutField::Cancel {
                base_button_style.reversed()
            } else {
                base_button_style
            });
        f.render_widget(cancel_button, button_layout[1]);

        // Row 6: Error Message (if present)
        if let Some(err) = error_message {
            f.render_widget(
                Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red)),
                chunks[10],
            );
        }

        // --- Cursor Positioning ---
        let cursor_target = match focused_field {
            WorkoutField::Distance => Some((chunks[3], distance_input)),
            WorkoutField::Duration => Some((chunks[5], duration_input)),
            WorkoutField::Metric => Some((chunks[7], metric_input)),
            _ => None, // No cursor for type options or buttons
        };
        if let Some((chunk, input)) = cursor_target {
            let cursor_x = (chunk.x + 1 + input.chars().count() as u16)
                .min(chunk.right().saturating_sub(1));
            f.set_cursor(cursor_x, chunk.y);
        }
    }
}

fn type_option_style(selected: bool, focused: bool, base: Style) -> Style {
    let style = if selected {
        base.bg(Color::DarkGray)
    } else {
        base
    };
    if selected && focused {
        style.reversed()
    } else {
        style
    }
}
