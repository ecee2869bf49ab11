mod layout;
mod map_panel;
mod modals;
mod status_bar;
mod workout_list;

// Re-export the main render function
pub use layout::render_ui;

use ratatui::style::Color;
use waymark_lib::{parse_color, StandardColor, Theme};

// Maps the configured color names onto terminal colors. Dark variants
// are the base ANSI colors, plain names the bright ones.
fn standard_color(color: StandardColor) -> Color {
    match color {
        StandardColor::Black => Color::Black,
        StandardColor::Red => Color::LightRed,
        StandardColor::Green => Color::LightGreen,
        StandardColor::Yellow => Color::LightYellow,
        StandardColor::Blue => Color::LightBlue,
        StandardColor::Magenta => Color::LightMagenta,
        StandardColor::Cyan => Color::LightCyan,
        StandardColor::White => Color::White,
        StandardColor::DarkGrey => Color::DarkGray,
        StandardColor::DarkRed => Color::Red,
        StandardColor::DarkGreen => Color::Green,
        StandardColor::DarkYellow => Color::Yellow,
        StandardColor::DarkBlue => Color::Blue,
        StandardColor::DarkMagenta => Color::Magenta,
        StandardColor::DarkCyan => Color::Cyan,
        StandardColor::Grey => Color::Gray,
    }
}

// Unknown names fall back to the built-in defaults.
pub(crate) fn theme_colors(theme: &Theme) -> (Color, Color) {
    let running = parse_color(&theme.running_color)
        .map_or(Color::LightGreen, standard_color);
    let cycling = parse_color(&theme.cycling_color)
        .map_or(Color::LightYellow, standard_color);
    (running, cycling)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_colors_follow_config_and_fall_back() {
        let theme = Theme {
            running_color: "DarkGreen".to_string(),
            cycling_color: "nonsense".to_string(),
        };
        let (running, cycling) = theme_colors(&theme);
        assert_eq!(running, Color::Green);
        assert_eq!(cycling, Color::LightYellow);
    }
}
