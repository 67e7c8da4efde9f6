#[cfg(test)]
mod tests {
    use jiggler::libs::activity::Bounds;
    use jiggler::libs::controller::{RunController, RunState, TimerOutcome};
    use jiggler::libs::interval::{Interval, RunDuration};
    use jiggler::libs::random::SequenceRandom;
    use jiggler::libs::settings::{OperationMode, Settings};
    use jiggler::libs::timers::{ManualTimers, TimerKind, Timers};
    use std::time::Duration;
    use test_context::{test_context, TestContext};

    type Controller = RunController<ManualTimers, SequenceRandom>;

    struct ControllerTestContext {
        controller: Controller,
    }

    impl TestContext for ControllerTestContext {
        fn setup() -> Self {
            let controller = RunController::new(
                Settings::default(),
                Vec::new(),
                ManualTimers::new(),
                SequenceRandom::new(vec![0.1, 0.3, 0.5, 0.7, 0.9]),
            )
            .with_area(Some(Bounds::new(800.0, 600.0)));
            ControllerTestContext { controller }
        }
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_one_second_interval_counts_four_after_three_seconds(ctx: &mut ControllerTestContext) {
        let controller = &mut ctx.controller;
        assert_eq!(controller.settings().interval.total_milliseconds(), 1_000);
        let first_window = controller.active_window().to_string();
        let initial_position = controller.position();

        controller.start();
        assert_eq!(controller.event_count(), 1);
        assert_ne!(controller.position(), initial_position);

        controller.advance(ms(3_000));
        assert_eq!(controller.event_count(), 4);
        assert_eq!(controller.state(), RunState::Running);
        assert_eq!(controller.active_window(), first_window);

        let position = controller.position();
        assert!(position.x >= 0.0 && position.x < 800.0);
        assert!(position.y >= 0.0 && position.y < 600.0);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_zero_interval_ticks_once_until_auto_stop(ctx: &mut ControllerTestContext) {
        let controller = &mut ctx.controller;
        controller.apply_settings(Settings {
            interval: Interval::default(),
            duration: RunDuration::new(0, 1),
            duration_enabled: true,
            mode: OperationMode::Switch,
        });
        let initial_position = controller.position();

        controller.start();
        assert_eq!(controller.position(), initial_position);
        assert!(!controller.is_tick_armed());
        assert!(controller.is_auto_stop_armed());

        controller.advance(ms(59_999));
        assert_eq!(controller.state(), RunState::Running);
        assert_eq!(controller.event_count(), 1);

        let outcomes = controller.advance(ms(1));
        assert_eq!(outcomes, vec![TimerOutcome::AutoStopped]);
        assert_eq!(controller.state(), RunState::Idle);
        assert_eq!(controller.event_count(), 0);
        assert_eq!(controller.timers().pending(), 0);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_disabled_duration_never_stops(ctx: &mut ControllerTestContext) {
        let controller = &mut ctx.controller;
        controller.set_duration(RunDuration::new(0, 1));

        controller.start();
        assert!(!controller.is_auto_stop_armed());

        controller.advance(ms(120_000));
        assert!(controller.is_running());
        assert_eq!(controller.event_count(), 121);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_toggle_twice_returns_to_idle(ctx: &mut ControllerTestContext) {
        let controller = &mut ctx.controller;

        assert_eq!(controller.toggle(), RunState::Running);
        assert_eq!(controller.event_count(), 1);
        assert_eq!(controller.toggle(), RunState::Idle);
        assert_eq!(controller.event_count(), 0);
        assert!(!controller.is_tick_armed());
        assert_eq!(controller.timers().pending(), 0);

        controller.advance(ms(5_000));
        assert_eq!(controller.event_count(), 0);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_stop_while_idle_is_harmless(ctx: &mut ControllerTestContext) {
        let controller = &mut ctx.controller;
        controller.stop();
        controller.stop();
        assert_eq!(controller.state(), RunState::Idle);
        assert_eq!(controller.timers().pending(), 0);
        assert!(controller.snapshot().started_at.is_none());
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_start_while_running_keeps_cadence(ctx: &mut ControllerTestContext) {
        let controller = &mut ctx.controller;
        controller.start();
        controller.advance(ms(500));

        controller.start();
        assert_eq!(controller.event_count(), 2);
        assert_eq!(controller.timers().pending(), 1);

        controller.advance(ms(500));
        assert_eq!(controller.event_count(), 3);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_interval_change_rearms_from_change(ctx: &mut ControllerTestContext) {
        let controller = &mut ctx.controller;
        controller.start();
        controller.advance(ms(500));

        controller.set_interval(Interval::new(0, 0, 2, 0));
        assert_eq!(controller.timers().pending(), 1);

        controller.advance(ms(1_999));
        assert_eq!(controller.event_count(), 1);
        controller.advance(ms(1));
        assert_eq!(controller.event_count(), 2);
        assert_eq!(controller.now_ms(), 2_500);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_interval_change_while_idle_arms_nothing(ctx: &mut ControllerTestContext) {
        let controller = &mut ctx.controller;
        controller.set_interval(Interval::new(0, 0, 0, 100));
        controller.set_duration_enabled(true);
        controller.set_mode(OperationMode::Hybrid);

        assert_eq!(controller.timers().pending(), 0);
        assert_eq!(controller.settings().interval.total_milliseconds(), 100);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_enabling_duration_while_running_counts_from_change(ctx: &mut ControllerTestContext) {
        let controller = &mut ctx.controller;
        controller.set_duration(RunDuration::new(0, 1));
        controller.start();
        controller.advance(ms(10_000));
        assert_eq!(controller.event_count(), 11);

        controller.set_duration_enabled(true);
        assert!(controller.is_auto_stop_armed());

        controller.advance(ms(59_999));
        assert!(controller.is_running());
        controller.advance(ms(1));
        assert_eq!(controller.state(), RunState::Idle);
        assert_eq!(controller.event_count(), 0);
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_disabling_duration_cancels_auto_stop(ctx: &mut ControllerTestContext) {
        let controller = &mut ctx.controller;
        controller.set_duration(RunDuration::new(0, 1));
        controller.set_duration_enabled(true);
        controller.start();
        assert!(controller.is_auto_stop_armed());

        controller.set_duration_enabled(false);
        assert!(!controller.is_auto_stop_armed());

        controller.advance(ms(120_000));
        assert!(controller.is_running());
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_mode_change_applies_to_next_tick(ctx: &mut ControllerTestContext) {
        let controller = &mut ctx.controller;
        let first_window = controller.active_window().to_string();
        controller.start();
        assert_eq!(controller.active_window(), first_window);

        controller.set_mode(OperationMode::Switch);
        let position = controller.position();
        controller.advance(ms(1_000));

        assert_eq!(controller.position(), position);
        assert!(controller.windows().iter().any(|w| w == controller.active_window()));
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_stale_handle_is_ignored(_ctx: &mut ControllerTestContext) {
        let mut timers = ManualTimers::new();
        let stale = timers.arm_once(ms(100), TimerKind::Tick);
        timers.cancel(stale);

        let mut controller = RunController::new(Settings::default(), Vec::new(), timers, SequenceRandom::new(vec![0.5]));
        assert_eq!(controller.handle_timer(stale), TimerOutcome::Stale);

        controller.start();
        assert_eq!(controller.handle_timer(stale), TimerOutcome::Stale);
        assert_eq!(controller.event_count(), 1);
        assert!(controller.is_running());
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_snapshot_reflects_run(ctx: &mut ControllerTestContext) {
        let controller = &mut ctx.controller;
        controller.start();
        let snapshot = controller.snapshot();

        assert_eq!(snapshot.state, RunState::Running);
        assert_eq!(snapshot.event_count, 1);
        assert_eq!(snapshot.interval_ms, 1_000);
        assert_eq!(snapshot.duration_ms, 300_000);
        assert!(snapshot.tick_armed);
        assert!(!snapshot.auto_stop_armed);
        assert!(snapshot.started_at.is_some());

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["state"], "running");
        assert_eq!(json["mode"], "jiggle");
    }

    #[test_context(ControllerTestContext)]
    #[test]
    fn test_empty_window_list_uses_defaults(_ctx: &mut ControllerTestContext) {
        let controller = RunController::new(Settings::default(), Vec::new(), ManualTimers::new(), SequenceRandom::new(vec![]));
        assert_eq!(controller.windows().len(), 5);
        assert_eq!(controller.active_window(), "Project_Phoenix.docx");
    }
}
