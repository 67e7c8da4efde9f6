#[cfg(test)]
mod tests {
    use jiggler::libs::activity::Bounds;
    use jiggler::libs::input::{InputError, ShellCommand};
    use jiggler::libs::interval::{Interval, RunDuration};
    use jiggler::libs::settings::{clamped_interval, IntervalField, OperationMode};

    fn parse(line: &str) -> Result<ShellCommand, InputError> {
        line.parse()
    }

    #[test]
    fn test_run_commands_and_aliases() {
        assert_eq!(parse("start"), Ok(ShellCommand::Start));
        assert_eq!(parse("  STOP  "), Ok(ShellCommand::Stop));
        assert_eq!(parse("t"), Ok(ShellCommand::Toggle));
        assert_eq!(parse("s"), Ok(ShellCommand::Status));
        assert_eq!(parse("?"), Ok(ShellCommand::Help));
        assert_eq!(parse("exit"), Ok(ShellCommand::Quit));
        assert_eq!(parse("windows"), Ok(ShellCommand::Windows));
    }

    #[test]
    fn test_interval_is_clamped() {
        assert_eq!(
            parse("interval 25 70 -3 5000"),
            Ok(ShellCommand::Interval(Interval::new(23, 59, 0, 999)))
        );
        assert_eq!(parse("interval 0 1 1 500"), Ok(ShellCommand::Interval(Interval::new(0, 1, 1, 500))));
    }

    #[test]
    fn test_single_field_keeps_raw_value() {
        assert_eq!(parse("ms 1500"), Ok(ShellCommand::IntervalField(IntervalField::Milliseconds, 1500)));
        assert_eq!(parse("hours -2"), Ok(ShellCommand::IntervalField(IntervalField::Hours, -2)));

        let interval = IntervalField::Milliseconds.apply(Interval::new(0, 0, 1, 0), 1500);
        assert_eq!(interval, Interval::new(0, 0, 1, 999));
        let interval = IntervalField::Hours.apply(interval, -2);
        assert_eq!(interval.hours, 0);
    }

    #[test]
    fn test_duration_commands() {
        assert_eq!(parse("duration 120 90"), Ok(ShellCommand::Duration(RunDuration::new(99, 59))));
        assert_eq!(parse("duration on"), Ok(ShellCommand::DurationEnabled(true)));
        assert_eq!(parse("duration OFF"), Ok(ShellCommand::DurationEnabled(false)));
        assert_eq!(parse("duration"), Err(InputError::Usage("duration H M | duration on|off")));
    }

    #[test]
    fn test_mode_command() {
        assert_eq!(parse("mode hybrid"), Ok(ShellCommand::Mode(OperationMode::Hybrid)));
        assert_eq!(parse("mode Switch"), Ok(ShellCommand::Mode(OperationMode::Switch)));
        assert_eq!(parse("mode dance"), Err(InputError::UnknownMode("dance".to_string())));
    }

    #[test]
    fn test_area_command() {
        assert_eq!(parse("area 120 40"), Ok(ShellCommand::Area(Some(Bounds::new(120.0, 40.0)))));
        assert_eq!(parse("area -5 40"), Ok(ShellCommand::Area(Some(Bounds::new(0.0, 40.0)))));
        assert_eq!(parse("area off"), Ok(ShellCommand::Area(None)));
    }

    #[test]
    fn test_rejected_input() {
        assert_eq!(parse(""), Err(InputError::Empty));
        assert_eq!(parse("dance"), Err(InputError::UnknownCommand("dance".to_string())));
        assert_eq!(parse("interval 1 2"), Err(InputError::Usage("interval H M S MS")));
        assert_eq!(parse("seconds abc"), Err(InputError::NotANumber("abc".to_string())));
        assert_eq!(parse("start now"), Err(InputError::Usage("start")));
    }

    #[test]
    fn test_huge_numbers_saturate_then_clamp() {
        assert_eq!(
            parse("interval 99999999999999999999 0 0 0"),
            Ok(ShellCommand::Interval(Interval::new(23, 0, 0, 0)))
        );
        assert_eq!(clamped_interval(i64::MIN, 0, 0, 0), Interval::new(0, 0, 0, 0));
    }
}
