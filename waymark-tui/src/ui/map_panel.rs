use crate::app::App;
use crate::ui::theme_colors;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    symbols,
    text::Span,
    widgets::{
        block::{Position, Title},
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders,
    },
    Frame,
};
use waymark_lib::WorkoutType;

// Popup text is cut to this many characters, its fixed maximum width.
const POPUP_MAX_CHARS: usize = 12;

pub fn render_map_panel(f: &mut Frame, app: &mut App, area: Rect) {
    let (running_color, cycling_color) = theme_colors(&app.service.config.theme);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!("Map (zoom {})", app.map_view.zoom))
        .title(
            Title::from(" © OpenStreetMap ")
                .position(Position::Bottom)
                .alignment(Alignment::Right),
        );
    let inner = block.inner(area);
    // Remembered so mouse clicks can be mapped back to coordinates.
    app.map_area = inner;

    let ([west, east], [south, north]) = app.map_view.bounds();
    let cell_lng = (east - west) / f64::from(inner.width.max(1));
    let cell_lat = (north - south) / f64::from(inner.height.max(1));

    // Gather marker positions and popup labels up front; the paint
    // closure only reads them.
    let mut run_coords: Vec<(f64, f64)> = Vec::new();
    let mut cyc_coords: Vec<(f64, f64)> = Vec::new();
    let mut labels: Vec<(f64, f64, String, Color)> = Vec::new();
    for workout in app.service.workouts() {
        let (lng, lat) = (workout.point.longitude, workout.point.latitude);
        let color = match workout.workout_type() {
            WorkoutType::Running => {
                run_coords.push((lng, lat));
                running_color
            }
            WorkoutType::Cycling => {
                cyc_coords.push((lng, lat));
                cycling_color
            }
        };
        labels.push((lng, lat, "▼".to_string(), color));
        // The popup sits one row above its marker, roughly centered,
        // and stays open permanently.
        let text: String = workout
            .workout_type()
            .to_string()
            .chars()
            .take(POPUP_MAX_CHARS)
            .collect();
        let offset = cell_lng * text.chars().count() as f64 / 2.0;
        labels.push((lng - offset, lat + cell_lat, text, color));
    }
    let located = (
        app.located_position.longitude,
        app.located_position.latitude,
    );

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds([west, east])
        .y_bounds([south, north])
        .paint(move |ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::Gray,
            });
            ctx.draw(&Points {
                coords: &run_coords,
                color: running_color,
            });
            ctx.draw(&Points {
                coords: &cyc_coords,
                color: cycling_color,
            });
            // Plain marker at the position the map was centered on.
            ctx.print(
                located.0,
                located.1,
                Span::styled("●", Style::default().fg(Color::Cyan).bold()),
            );
            for (lng, lat, text, color) in &labels {
                ctx.print(
                    *lng,
                    *lat,
                    Span::styled(text.clone(), Style::default().fg(*color)),
                );
            }
        });

    f.render_widget(canvas, area);
}
