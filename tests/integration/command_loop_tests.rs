//! Integration tests for the serial → parse → dispatch → actuator pipeline
//! driven by `RobotController::run`.

use embedded_io_async::ErrorKind;
use futures_lite::future::block_on;
use serial_robot::Stats;

use crate::mock_hw::{Call, Journal, MockRobot, ScriptedSerial, mock_robot, robot_with_broken_pins};

/// Feeds `serial` through the command loop until the script runs out.
fn run(robot: &mut MockRobot, serial: ScriptedSerial) -> Stats {
    let mut lines = serial.into_lines();
    block_on(robot.run(&mut lines))
}

/// Runs one script on a fresh robot and returns the journal.
fn journal_for(input: &[u8]) -> Journal {
    let (mut robot, journal) = mock_robot();
    run(&mut robot, ScriptedSerial::new().bytes(input));
    journal
}

#[test]
fn each_token_reaches_its_routine() {
    assert_eq!(journal_for(b"FWD\n").drive_levels(), [true, false, true, false]);
    assert_eq!(journal_for(b"BACK\n").drive_levels(), [false, true, false, true]);
    assert_eq!(journal_for(b"TURN\n").drive_levels(), [true, false, false, true]);
    assert_eq!(journal_for(b"STOP\n").drive_levels(), [false; 4]);
    assert_eq!(journal_for(b"TILT\n").servo_angles(), [60, 120, 90]);
    assert_eq!(journal_for(b"BEEP\n").calls().last(), Some(&Call::NoTone));
}

#[test]
fn unrecognized_lines_cause_no_actuation() {
    let (mut robot, journal) = mock_robot();
    let input = b"fwd\n\nFORWARD\nBEEPS\n \r\nSTOP NOW\nTilt\n";

    let stats = run(&mut robot, ScriptedSerial::new().bytes(input));

    assert!(journal.calls().is_empty(), "got {:?}", journal.calls());
    assert_eq!(stats.unrecognized, 7);
    assert_eq!(stats.executed, 0);
}

#[test]
fn padded_token_behaves_like_exact_token() {
    let exact = journal_for(b"FWD\n");
    let padded = journal_for(b" FWD \r\n");

    assert_eq!(padded.calls(), exact.calls());
}

#[test]
fn unicode_padded_token_causes_no_actuation() {
    let (mut robot, journal) = mock_robot();
    let input = "\u{a0}FWD\nBEEP\u{2003}\n\x0bSTOP\x0b\n";

    let stats = run(&mut robot, ScriptedSerial::new().bytes(input.as_bytes()));

    assert_eq!(stats.unrecognized, 2);
    assert_eq!(stats.executed, 1);
    assert!(!journal.calls().iter().any(|c| matches!(c, Call::Tone { .. })));
    assert_eq!(journal.drive_levels(), [false; 4]);
}

#[test]
fn forward_then_stop_ends_all_low() {
    let (mut robot, journal) = mock_robot();

    run(&mut robot, ScriptedSerial::new().bytes(b"FWD\nSTOP\n"));

    let snapshots = journal.drive_snapshots();
    assert!(snapshots.contains(&[true, false, true, false]));
    assert_eq!(journal.drive_levels(), [false; 4]);
}

#[test]
fn stop_twice_writes_all_low_both_times() {
    let (mut robot, journal) = mock_robot();

    let stats = run(&mut robot, ScriptedSerial::new().bytes(b"STOP\nSTOP\n"));

    let snapshots = journal.drive_snapshots();
    assert_eq!(snapshots.len(), 8);
    assert_eq!(snapshots[3], [false; 4]);
    assert_eq!(snapshots[7], [false; 4]);
    assert_eq!(stats.executed, 2);
}

#[test]
fn lines_queued_during_a_routine_run_afterwards_in_order() {
    let (mut robot, journal) = mock_robot();

    // Everything arrives in one burst while BEEP is still playing.
    run(&mut robot, ScriptedSerial::new().bytes(b"BEEP\nFWD\nTILT\n"));

    let calls = journal.calls();
    let no_tone = calls.iter().position(|c| *c == Call::NoTone).unwrap();
    let first_pin = calls
        .iter()
        .position(|c| matches!(c, Call::Pin { .. }))
        .unwrap();
    let first_servo = calls
        .iter()
        .position(|c| matches!(c, Call::Servo { .. }))
        .unwrap();
    assert!(no_tone < first_pin);
    assert!(first_pin < first_servo);
}

#[test]
fn line_split_across_reads_is_reassembled() {
    let (mut robot, journal) = mock_robot();

    run(
        &mut robot,
        ScriptedSerial::new().bytes(b"TI").bytes(b"LT").bytes(b"\n"),
    );

    assert_eq!(journal.servo_angles(), [60, 120, 90]);
}

#[test]
fn overlong_line_is_dropped_and_loop_continues() {
    let (mut robot, journal) = mock_robot();
    let mut input = vec![b'X'; 200];
    input.extend_from_slice(b"\nFWD\n");

    let stats = run(&mut robot, ScriptedSerial::new().bytes(&input));

    assert_eq!(stats.overflowed, 1);
    assert_eq!(stats.executed, 1);
    assert_eq!(journal.drive_levels(), [true, false, true, false]);
}

#[test]
fn idle_timeout_executes_unterminated_command() {
    let (mut robot, journal) = mock_robot();

    let stats = run(
        &mut robot,
        ScriptedSerial::new()
            .bytes(b"TURN")
            .fault(ErrorKind::TimedOut)
            .bytes(b"STOP\n"),
    );

    assert_eq!(stats.executed, 2);
    assert_eq!(stats.read_errors, 0);
    assert!(journal.drive_snapshots().contains(&[true, false, false, true]));
    assert_eq!(journal.drive_levels(), [false; 4]);
}

#[test]
fn read_error_drops_partial_line_and_loop_continues() {
    let (mut robot, journal) = mock_robot();

    let stats = run(
        &mut robot,
        ScriptedSerial::new()
            .bytes(b"BE")
            .fault(ErrorKind::Other)
            .bytes(b"EP\nBACK\n"),
    );

    assert_eq!(stats.read_errors, 1);
    assert_eq!(stats.unrecognized, 1, "the orphaned \"EP\" is unknown");
    assert_eq!(stats.executed, 1);
    assert!(!journal.calls().iter().any(|c| matches!(c, Call::Tone { .. })));
    assert_eq!(journal.drive_levels(), [false, true, false, true]);
}

#[test]
fn actuator_failure_is_counted_and_loop_continues() {
    let (mut robot, journal) = robot_with_broken_pins();

    let stats = run(&mut robot, ScriptedSerial::new().bytes(b"FWD\nTILT\n"));

    assert_eq!(stats.actuator_errors, 1);
    assert_eq!(stats.executed, 1);
    assert_eq!(journal.servo_angles(), [60, 120, 90]);
}

#[test]
fn stats_tally_a_mixed_session() {
    let (mut robot, _) = mock_robot();

    let stats = run(
        &mut robot,
        ScriptedSerial::new().bytes(b"FWD\nHELLO\nBEEP\nTILT\n\nSTOP\n"),
    );

    assert_eq!(
        stats,
        Stats {
            executed: 4,
            unrecognized: 2,
            ..Stats::default()
        }
    );
    assert_eq!(robot.stats(), stats);
}
