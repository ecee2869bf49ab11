use super::{
    map::PAN_STEP,
    modals::handle_workout_form_input,
    state::{ActiveModal, App},
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

// Main event handler methods on App
impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Handle based on active modal first
        if self.active_modal != ActiveModal::None {
            return self.handle_modal_input(key);
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.active_modal = ActiveModal::Help,
            KeyCode::Left | KeyCode::Char('h') => self.map_view.pan(-PAN_STEP, 0.0),
            KeyCode::Right | KeyCode::Char('l') => self.map_view.pan(PAN_STEP, 0.0),
            KeyCode::Up | KeyCode::Char('k') => self.map_view.pan(0.0, PAN_STEP),
            KeyCode::Down | KeyCode::Char('j') => self.map_view.pan(0.0, -PAN_STEP),
            KeyCode::Char('+') | KeyCode::Char('=') => self.map_view.zoom_in(),
            KeyCode::Char('-') => self.map_view.zoom_out(),
            _ => {}
        }
        Ok(())
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<()> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_left_click(mouse.column, mouse.row),
            MouseEventKind::ScrollUp => {
                if self.active_modal == ActiveModal::None
                    && self
                        .map_view
                        .point_at(self.map_area, mouse.column, mouse.row)
                        .is_some()
                {
                    self.map_view.zoom_in();
                }
            }
            MouseEventKind::ScrollDown => {
                if self.active_modal == ActiveModal::None
                    && self
                        .map_view
                        .point_at(self.map_area, mouse.column, mouse.row)
                        .is_some()
                {
                    self.map_view.zoom_out();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_left_click(&mut self, column: u16, row: u16) {
        if self.active_modal == ActiveModal::Help {
            return;
        }
        // Clicks on the form itself are not map clicks.
        if matches!(self.active_modal, ActiveModal::WorkoutForm { .. })
            && contains(self.modal_area, column, row)
        {
            return;
        }
        if let Some(point) = self.map_view.point_at(self.map_area, column, row) {
            debug!(
                lat = point.latitude,
                lng = point.longitude,
                "map click captured"
            );
            match self.active_modal {
                // A further click while the form is open re-targets it
                // without touching the entered values.
                ActiveModal::WorkoutForm { .. } => self.pending_point = Some(point),
                _ => self.open_workout_form(point),
            }
        }
    }

    // --- Modal Input Handling ---
    fn handle_modal_input(&mut self, key: KeyEvent) -> Result<()> {
        match self.active_modal {
            ActiveModal::Help => self.handle_help_modal_input(key),
            ActiveModal::WorkoutForm { .. } => handle_workout_form_input(self, key)?,
            ActiveModal::None => {}
        }
        Ok(())
    }

    fn handle_help_modal_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Char('?') => {
                self.active_modal = ActiveModal::None;
            }
            _ => {} // Ignore other keys in help
        }
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}
