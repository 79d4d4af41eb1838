#[cfg(test)]
mod tests {
    use crate::Time;
    use crate::app::App;
    use crate::components::GameState;
    use crate::menu_types::MenuState;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_fresh_clock_reports_no_elapsed_time() {
        let time = Time::default();
        assert!(time.delta_millis().abs() < f32::EPSILON);
    }

    #[test]
    fn test_update_measures_frame_in_millis() {
        let mut time = Time::new();
        sleep(Duration::from_millis(20));
        time.update();

        let millis = time.delta_millis();
        assert!(millis > 19.0, "expected at least 20ms, got {millis}");
        assert!(millis < 2000.0, "frame delta should be in ms, got {millis}");
    }

    #[test]
    fn test_update_restarts_the_frame() {
        let mut time = Time::new();
        sleep(Duration::from_millis(30));
        time.update();
        let first = time.delta_millis();

        time.update();
        assert!(time.delta_millis() < first);
    }

    #[test]
    fn test_frame_delta_drives_fall_timer() {
        let mut app = App::default();
        app.menu.state = MenuState::Game;
        sleep(Duration::from_millis(10));

        let delta = {
            let mut time = app.world.resource_mut::<Time>();
            time.update();
            time.delta_millis()
        };
        app.on_tick(delta);

        // Far below one fall interval, so the timer holds the whole delta
        let state = app.world.resource::<GameState>();
        assert!((state.fall_timer_ms - delta).abs() < 0.001);
        assert!((state.ramp_timer_ms - delta).abs() < 0.001);
    }
}
