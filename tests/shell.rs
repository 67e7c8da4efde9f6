#[cfg(test)]
mod tests {
    use jiggler::libs::controller::{RunController, RunState};
    use jiggler::libs::input::ShellCommand;
    use jiggler::libs::random::SequenceRandom;
    use jiggler::libs::settings::{OperationMode, Settings};
    use jiggler::libs::shell::{execute, execute_line, spawn_stdin_reader, Flow};
    use jiggler::libs::timers::{ManualTimers, Timers};
    use jiggler::libs::view::{Renderer, View};
    use std::io::Cursor;
    use std::time::Duration;
    use test_context::{test_context, TestContext};

    struct ShellTestContext {
        controller: RunController<ManualTimers, SequenceRandom>,
        renderer: Renderer,
    }

    impl TestContext for ShellTestContext {
        fn setup() -> Self {
            ShellTestContext {
                controller: RunController::new(
                    Settings::default(),
                    Vec::new(),
                    ManualTimers::new(),
                    SequenceRandom::new(vec![0.2, 0.4, 0.6, 0.8]),
                ),
                renderer: Renderer::new(false),
            }
        }
    }

    #[test_context(ShellTestContext)]
    #[test]
    fn test_start_and_stop_lines(ctx: &mut ShellTestContext) {
        assert_eq!(execute_line(&mut ctx.controller, "start", &ctx.renderer), Flow::Continue);
        assert_eq!(ctx.controller.state(), RunState::Running);

        assert_eq!(execute_line(&mut ctx.controller, "stop", &ctx.renderer), Flow::Continue);
        assert_eq!(ctx.controller.state(), RunState::Idle);
        assert_eq!(ctx.controller.timers().pending(), 0);
    }

    #[test_context(ShellTestContext)]
    #[test]
    fn test_bad_line_changes_nothing(ctx: &mut ShellTestContext) {
        assert_eq!(execute_line(&mut ctx.controller, "interval a b c d", &ctx.renderer), Flow::Continue);
        assert_eq!(execute_line(&mut ctx.controller, "launch", &ctx.renderer), Flow::Continue);
        assert_eq!(ctx.controller.settings(), &Settings::default());
        assert_eq!(ctx.controller.state(), RunState::Idle);
    }

    #[test_context(ShellTestContext)]
    #[test]
    fn test_quit_ends_the_loop(ctx: &mut ShellTestContext) {
        assert_eq!(execute_line(&mut ctx.controller, "quit", &ctx.renderer), Flow::Quit);
        assert_eq!(execute(&mut ctx.controller, ShellCommand::Quit), Flow::Quit);
    }

    #[test_context(ShellTestContext)]
    #[test]
    fn test_field_edit_while_running_rearms(ctx: &mut ShellTestContext) {
        execute(&mut ctx.controller, ShellCommand::Start);
        ctx.controller.advance(Duration::from_millis(400));

        execute_line(&mut ctx.controller, "ms 500", &ctx.renderer);
        assert_eq!(ctx.controller.settings().interval.total_milliseconds(), 1_500);

        ctx.controller.advance(Duration::from_millis(1_499));
        assert_eq!(ctx.controller.event_count(), 1);
        ctx.controller.advance(Duration::from_millis(1));
        assert_eq!(ctx.controller.event_count(), 2);
    }

    #[test_context(ShellTestContext)]
    #[test]
    fn test_duration_lines_arm_auto_stop(ctx: &mut ShellTestContext) {
        execute_line(&mut ctx.controller, "duration 0 1", &ctx.renderer);
        execute_line(&mut ctx.controller, "duration on", &ctx.renderer);
        execute_line(&mut ctx.controller, "toggle", &ctx.renderer);
        assert!(ctx.controller.is_auto_stop_armed());

        ctx.controller.advance(Duration::from_secs(60));
        assert_eq!(ctx.controller.state(), RunState::Idle);
    }

    #[test_context(ShellTestContext)]
    #[test]
    fn test_mode_and_area_lines(ctx: &mut ShellTestContext) {
        execute_line(&mut ctx.controller, "mode switch", &ctx.renderer);
        assert_eq!(ctx.controller.settings().mode, OperationMode::Switch);

        execute_line(&mut ctx.controller, "area 0 10", &ctx.renderer);
        assert!(ctx.controller.area().is_some_and(|a| !a.is_measurable()));

        execute_line(&mut ctx.controller, "area off", &ctx.renderer);
        assert_eq!(ctx.controller.area(), None);
    }

    #[test_context(ShellTestContext)]
    #[test]
    fn test_read_only_commands(ctx: &mut ShellTestContext) {
        for line in ["status", "windows", "help"] {
            assert_eq!(execute_line(&mut ctx.controller, line, &ctx.renderer), Flow::Continue);
        }
        assert_eq!(ctx.controller.state(), RunState::Idle);
    }

    #[test_context(ShellTestContext)]
    #[test]
    fn test_status_line_and_json(ctx: &mut ShellTestContext) {
        execute(&mut ctx.controller, ShellCommand::Start);
        let snapshot = ctx.controller.snapshot();

        let line = View::status_line(&snapshot);
        assert!(line.contains("running"));
        assert!(line.contains("events:     1"));

        let json = View::json(&snapshot).unwrap();
        assert!(json.contains("\"event_count\":1"));
    }

    #[tokio::test]
    async fn test_stdin_reader_forwards_lines_then_closes() {
        let mut lines = spawn_stdin_reader(Cursor::new(b"start\nmode hybrid\n".to_vec())).unwrap();

        assert_eq!(lines.recv().await.unwrap().unwrap(), "start");
        assert_eq!(lines.recv().await.unwrap().unwrap(), "mode hybrid");
        assert!(lines.recv().await.is_none());
    }
}
