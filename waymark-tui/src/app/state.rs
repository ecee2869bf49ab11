use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};
use waymark_lib::{AppService, GeoPoint, WorkoutType};

use super::map::MapView;

// Which input inside the workout form has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkoutField {
    Type,
    Distance,
    Duration,
    Metric,
    Confirm,
    Cancel,
}

// Which of the two type-specific rows is currently visible. Flipped by
// the toggle on a type change, never recomputed from the type itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricRow {
    Cadence,
    Elevation,
}

impl MetricRow {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            MetricRow::Cadence => MetricRow::Elevation,
            MetricRow::Elevation => MetricRow::Cadence,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActiveModal {
    None,
    Help,
    WorkoutForm {
        workout_type: WorkoutType,
        distance_input: String,
        duration_input: String,
        cadence_input: String,
        elevation_input: String,
        metric_row: MetricRow,
        focused_field: WorkoutField,
        error_message: Option<String>,
    },
}

// Holds the application state
pub struct App {
    pub service: AppService,
    pub map_view: MapView,
    pub located_position: GeoPoint,
    // Coordinates of the most recent map click, kept after a submit.
    pub pending_point: Option<GeoPoint>,
    pub workout_list_state: ListState,
    pub active_modal: ActiveModal,
    // Select state kept across form opens; the text inputs always start empty.
    pub form_type: WorkoutType,
    pub form_metric_row: MetricRow,
    pub should_quit: bool,
    pub last_error: Option<String>,
    pub error_clear_time: Option<Instant>,
    // Areas captured during the last render, used to map mouse events.
    pub map_area: Rect,
    pub modal_area: Rect,
}

impl App {
    pub fn new(service: AppService, origin: GeoPoint) -> Self {
        App {
            service,
            map_view: MapView::new(origin),
            located_position: origin,
            pending_point: None,
            workout_list_state: ListState::default(),
            active_modal: ActiveModal::None,
            form_type: WorkoutType::Running,
            form_metric_row: MetricRow::Cadence,
            should_quit: false,
            last_error: None,
            error_clear_time: None,
            map_area: Rect::default(),
            modal_area: Rect::default(),
        }
    }

    pub fn set_error(&mut self, msg: String) {
        self.last_error = Some(msg);
        self.error_clear_time = Some(Instant::now() + Duration::from_secs(5));
    }

    pub(crate) fn clear_expired_error(&mut self) {
        if let Some(clear_time) = self.error_clear_time {
            if Instant::now() >= clear_time {
                self.last_error = None;
                self.error_clear_time = None;
            }
        }
    }

    // Called once per event loop iteration before drawing.
    pub fn refresh(&mut self) {
        self.clear_expired_error();
    }

    /// Stores the clicked coordinates and opens the form with empty inputs
    /// and the distance input focused. The type selector and its metric row
    /// come back as they were last left.
    pub fn open_workout_form(&mut self, point: GeoPoint) {
        self.pending_point = Some(point);
        self.active_modal = ActiveModal::WorkoutForm {
            workout_type: self.form_type,
            distance_input: String::new(),
            duration_input: String::new(),
            cadence_input: String::new(),
            elevation_input: String::new(),
            metric_row: self.form_metric_row,
            focused_field: WorkoutField::Distance,
            error_message: None,
        };
    }

    // Drops the form, remembering where the type selector was left.
    pub(crate) fn close_workout_form(&mut self) {
        if let ActiveModal::WorkoutForm {
            workout_type,
            metric_row,
            ..
        } = self.active_modal
        {
            self.form_type = workout_type;
            self.form_metric_row = metric_row;
        }
        self.active_modal = ActiveModal::None;
    }

    // Keeps the newest entry scrolled into view.
    pub(crate) fn select_newest_workout(&mut self) {
        let count = self.service.workouts().len();
        if count > 0 {
            self.workout_list_state.select(Some(count - 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_row_toggle_is_an_involution() {
        assert_eq!(MetricRow::Cadence.toggled(), MetricRow::Elevation);
        assert_eq!(MetricRow::Cadence.toggled().toggled(), MetricRow::Cadence);
    }
}
