use super::state::{ActiveModal, App, MetricRow, WorkoutField};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;
use waymark_lib::{WorkoutDraft, WorkoutType};

fn other_type(current: WorkoutType) -> WorkoutType {
    match current {
        WorkoutType::Running => WorkoutType::Cycling,
        WorkoutType::Cycling => WorkoutType::Running,
    }
}

pub fn handle_workout_form_input(app: &mut App, key: KeyEvent) -> Result<()> {
    let mut should_submit = false;

    if let ActiveModal::WorkoutForm {
        ref mut workout_type,
        ref mut distance_input,
        ref mut duration_input,
        ref mut cadence_input,
        ref mut elevation_input,
        ref mut metric_row,
        ref mut focused_field,
        ref mut error_message,
    } = app.active_modal
    {
        // Always clear error on any input
        *error_message = None;

        // Handle Shift+Tab for reverse navigation
        if key.code == KeyCode::BackTab {
            *focused_field = match *focused_field {
                WorkoutField::Type => WorkoutField::Cancel,
                WorkoutField::Distance => WorkoutField::Type,
                WorkoutField::Duration => WorkoutField::Distance,
                WorkoutField::Metric => WorkoutField::Duration,
                WorkoutField::Confirm => WorkoutField::Metric,
                WorkoutField::Cancel => WorkoutField::Confirm,
            };
        } else {
            match *focused_field {
                WorkoutField::Type => match key.code {
                    // Switching the type also toggles which metric row
                    // is visible; the row is never derived from the
                    // type directly.
                    KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                        *workout_type = other_type(*workout_type);
                        *metric_row = metric_row.toggled();
                    }
                    KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                        *focused_field = WorkoutField::Distance;
                    }
                    KeyCode::Up => *focused_field = WorkoutField::Cancel, // Wrap around up
                    KeyCode::Esc => {
                        app.close_workout_form();
                        return Ok(());
                    }
                    _ => {}
                },
                WorkoutField::Distance => match key.code {
                    KeyCode::Char(c) => distance_input.push(c),
                    KeyCode::Backspace => {
                        distance_input.pop();
                    }
                    KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                        *focused_field = WorkoutField::Duration;
                    }
                    KeyCode::Up => *focused_field = WorkoutField::Type,
                    KeyCode::Esc => {
                        app.close_workout_form();
                        return Ok(());
                    }
                    _ => {}
                },
                WorkoutField::Duration => match key.code {
                    KeyCode::Char(c) => duration_input.push(c),
                    KeyCode::Backspace => {
                        duration_input.pop();
                    }
                    KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                        *focused_field = WorkoutField::Metric;
                    }
                    KeyCode::Up => *focused_field = WorkoutField::Distance,
                    KeyCode::Esc => {
                        app.close_workout_form();
                        return Ok(());
                    }
                    _ => {}
                },
                WorkoutField::Metric => {
                    // Keystrokes land in whichever row is visible.
                    let input = match *metric_row {
                        MetricRow::Cadence => cadence_input,
                        MetricRow::Elevation => elevation_input,
                    };
                    match key.code {
                        KeyCode::Char(c) => input.push(c),
                        KeyCode::Backspace => {
                            input.pop();
                        }
                        KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                            *focused_field = WorkoutField::Confirm;
                        }
                        KeyCode::Up => *focused_field = WorkoutField::Duration,
                        KeyCode::Esc => {
                            app.close_workout_form();
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                // --- Button Fields ---
                WorkoutField::Confirm => match key.code {
                    KeyCode::Enter => {
                        should_submit = true;
                    }
                    KeyCode::Left | KeyCode::Backspace => {
                        *focused_field = WorkoutField::Cancel;
                    }
                    KeyCode::Right | KeyCode::Tab | KeyCode::Down => {
                        *focused_field = WorkoutField::Cancel; // Cycle behavior
                    }
                    KeyCode::Up => *focused_field = WorkoutField::Metric,
                    KeyCode::Esc => {
                        app.close_workout_form();
                        return Ok(());
                    }
                    _ => {}
                },
                WorkoutField::Cancel => match key.code {
                    KeyCode::Enter | KeyCode::Esc => {
                        app.close_workout_form();
                        return Ok(());
                    }
                    KeyCode::Left | KeyCode::Right | KeyCode::Backspace => {
                        *focused_field = WorkoutField::Confirm;
                    }
                    KeyCode::Tab | KeyCode::Down => {
                        *focused_field = WorkoutField::Type; // Wrap around to top
                    }
                    KeyCode::Up => *focused_field = WorkoutField::Metric,
                    _ => {}
                },
            }
        }
    } // End mutable borrow of app.active_modal

    // --- Submission Logic (runs only if should_submit is true) ---
    if should_submit {
        let draft = match &app.active_modal {
            ActiveModal::WorkoutForm {
                workout_type,
                distance_input,
                duration_input,
                cadence_input,
                elevation_input,
                ..
            } => Some(WorkoutDraft {
                workout_type: *workout_type,
                distance: distance_input.clone(),
                duration: duration_input.clone(),
                cadence: cadence_input.clone(),
                elevation: elevation_input.clone(),
            }),
            _ => None,
        };

        if let Some(draft) = draft {
            match app.service.create_workout(&draft, app.pending_point) {
                Ok(workout) => {
                    debug!(id = %workout.id, "workout form submitted");
                    // Dropping the form clears the text inputs; the pending
                    // click stays armed for the next submission.
                    app.close_workout_form();
                    app.select_newest_workout();
                }
                Err(err) => {
                    // Submission failed, re-borrow mutably to show the alert
                    if let ActiveModal::WorkoutForm {
                        ref mut error_message,
                        ..
                    } = app.active_modal
                    {
                        *error_message = Some(err.to_string());
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;
    use waymark_lib::{AppService, Config, GeoPoint, Storage};

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("workouts.json"));
        let service = AppService::new(Config::default(), dir.path().join("config.toml"), storage);
        let app = App::new(
            service,
            GeoPoint {
                latitude: 40.0,
                longitude: 2.0,
            },
        );
        (app, dir)
    }

    fn click_point() -> GeoPoint {
        GeoPoint {
            latitude: 41.39,
            longitude: 2.16,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_workout_form_input(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn opening_the_form_stores_the_click_and_focuses_distance() {
        let (mut app, _dir) = test_app();
        app.open_workout_form(click_point());

        assert!(app.pending_point.is_some());
        match &app.active_modal {
            ActiveModal::WorkoutForm {
                workout_type,
                metric_row,
                focused_field,
                ..
            } => {
                assert_eq!(*workout_type, WorkoutType::Running);
                assert_eq!(*metric_row, MetricRow::Cadence);
                assert_eq!(*focused_field, WorkoutField::Distance);
            }
            other => panic!("expected workout form, got {other:?}"),
        }
    }

    #[test]
    fn switching_type_twice_restores_the_visible_row() {
        let (mut app, _dir) = test_app();
        app.open_workout_form(click_point());

        // Distance -> Type, then flip twice.
        handle_workout_form_input(&mut app, key(KeyCode::Up)).unwrap();
        handle_workout_form_input(&mut app, key(KeyCode::Char(' '))).unwrap();
        match &app.active_modal {
            ActiveModal::WorkoutForm {
                workout_type,
                metric_row,
                ..
            } => {
                assert_eq!(*workout_type, WorkoutType::Cycling);
                assert_eq!(*metric_row, MetricRow::Elevation);
            }
            other => panic!("expected workout form, got {other:?}"),
        }

        handle_workout_form_input(&mut app, key(KeyCode::Char(' '))).unwrap();
        match &app.active_modal {
            ActiveModal::WorkoutForm {
                workout_type,
                metric_row,
                ..
            } => {
                assert_eq!(*workout_type, WorkoutType::Running);
                assert_eq!(*metric_row, MetricRow::Cadence);
            }
            other => panic!("expected workout form, got {other:?}"),
        }
    }

    #[test]
    fn filling_and_confirming_records_a_running_workout() {
        let (mut app, _dir) = test_app();
        app.open_workout_form(click_point());

        type_text(&mut app, "5");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "30");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "178");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        handle_workout_form_input(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.active_modal, ActiveModal::None);
        assert_eq!(app.service.workouts().len(), 1);
        assert_eq!(
            app.service.workouts()[0].workout_type(),
            WorkoutType::Running
        );
        // The click stays pending for the next workout.
        assert!(app.pending_point.is_some());
        assert_eq!(app.workout_list_state.selected(), Some(0));
    }

    #[test]
    fn cycling_with_negative_elevation_goes_through() {
        let (mut app, _dir) = test_app();
        app.open_workout_form(click_point());

        handle_workout_form_input(&mut app, key(KeyCode::Up)).unwrap(); // to Type
        handle_workout_form_input(&mut app, key(KeyCode::Char(' '))).unwrap(); // Cycling
        handle_workout_form_input(&mut app, key(KeyCode::Down)).unwrap(); // to Distance
        type_text(&mut app, "10");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "30");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "-50"); // lands in the elevation row
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        handle_workout_form_input(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.active_modal, ActiveModal::None);
        assert_eq!(
            app.service.workouts()[0].workout_type(),
            WorkoutType::Cycling
        );
    }

    #[test]
    fn invalid_input_keeps_the_form_populated_with_an_alert() {
        let (mut app, _dir) = test_app();
        app.open_workout_form(click_point());

        type_text(&mut app, "abc");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "30");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "178");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        handle_workout_form_input(&mut app, key(KeyCode::Enter)).unwrap();

        match &app.active_modal {
            ActiveModal::WorkoutForm {
                distance_input,
                error_message,
                ..
            } => {
                assert_eq!(distance_input, "abc");
                assert!(error_message
                    .as_deref()
                    .is_some_and(|m| m.contains("Invalid Input provided!!")));
            }
            other => panic!("expected workout form, got {other:?}"),
        }
        assert!(app.service.workouts().is_empty());

        // Any further key clears the alert.
        handle_workout_form_input(&mut app, key(KeyCode::Backspace)).unwrap();
        match &app.active_modal {
            ActiveModal::WorkoutForm { error_message, .. } => assert!(error_message.is_none()),
            other => panic!("expected workout form, got {other:?}"),
        }
    }

    #[test]
    fn submitting_without_a_pending_click_shows_the_alert() {
        let (mut app, _dir) = test_app();
        app.open_workout_form(click_point());
        app.pending_point = None;

        type_text(&mut app, "5");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "30");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "178");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        handle_workout_form_input(&mut app, key(KeyCode::Enter)).unwrap();

        match &app.active_modal {
            ActiveModal::WorkoutForm { error_message, .. } => {
                assert!(error_message
                    .as_deref()
                    .is_some_and(|m| m.contains("Click the map")));
            }
            other => panic!("expected workout form, got {other:?}"),
        }
        assert!(app.service.workouts().is_empty());
    }

    #[test]
    fn escape_closes_the_form_without_recording() {
        let (mut app, _dir) = test_app();
        app.open_workout_form(click_point());

        type_text(&mut app, "5");
        handle_workout_form_input(&mut app, key(KeyCode::Esc)).unwrap();

        assert_eq!(app.active_modal, ActiveModal::None);
        assert!(app.service.workouts().is_empty());
        assert!(app.pending_point.is_some());
    }

    #[test]
    fn backtab_reverses_focus_without_a_shift_modifier() {
        let (mut app, _dir) = test_app();
        app.open_workout_form(click_point());

        // Some terminals report BackTab with no modifier bits set.
        handle_workout_form_input(
            &mut app,
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE),
        )
        .unwrap();

        match &app.active_modal {
            ActiveModal::WorkoutForm { focused_field, .. } => {
                assert_eq!(*focused_field, WorkoutField::Type);
            }
            other => panic!("expected workout form, got {other:?}"),
        }
    }

    #[test]
    fn type_selector_value_survives_reopening() {
        let (mut app, _dir) = test_app();
        app.open_workout_form(click_point());

        handle_workout_form_input(&mut app, key(KeyCode::Up)).unwrap(); // to Type
        handle_workout_form_input(&mut app, key(KeyCode::Char(' '))).unwrap(); // Cycling
        handle_workout_form_input(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.active_modal, ActiveModal::None);

        app.open_workout_form(click_point());
        match &app.active_modal {
            ActiveModal::WorkoutForm {
                workout_type,
                metric_row,
                distance_input,
                focused_field,
                ..
            } => {
                assert_eq!(*workout_type, WorkoutType::Cycling);
                assert_eq!(*metric_row, MetricRow::Elevation);
                assert!(distance_input.is_empty());
                assert_eq!(*focused_field, WorkoutField::Distance);
            }
            other => panic!("expected workout form, got {other:?}"),
        }

        // Submitting keeps the selection for the next open as well.
        type_text(&mut app, "10");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "30");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "-50");
        handle_workout_form_input(&mut app, key(KeyCode::Tab)).unwrap();
        handle_workout_form_input(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.active_modal, ActiveModal::None);

        app.open_workout_form(click_point());
        match &app.active_modal {
            ActiveModal::WorkoutForm { workout_type, .. } => {
                assert_eq!(*workout_type, WorkoutType::Cycling);
            }
            other => panic!("expected workout form, got {other:?}"),
        }
    }
}
