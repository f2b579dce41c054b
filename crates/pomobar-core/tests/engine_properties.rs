//! Property tests for the timer state machine.

mod common;

use common::Harness;
use pomobar_core::Phase;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Command {
    Start,
    Stop,
    Toggle,
    Reset,
    Tick(u8),
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Start),
        Just(Command::Stop),
        Just(Command::Toggle),
        Just(Command::Reset),
        (1u8..=90).prop_map(Command::Tick),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn countdown_is_monotone(work in 1i64..=3, ticks in 0u64..=180) {
        let mut h = Harness::with_minutes(work, 1, 1, 4);
        let total = work as u64 * 60;
        let ticks = ticks.min(total);
        h.engine.start();
        h.tick_n(ticks);
        prop_assert_eq!(h.engine.remaining_seconds(), total - ticks);
        prop_assert!(h.engine.is_running());
        prop_assert_eq!(h.engine.phase(), Phase::Work);
    }

    #[test]
    fn long_break_every_interval(interval in 2i64..=6, completions in 1u32..=14) {
        let mut h = Harness::with_minutes(1, 1, 1, interval);
        for n in 1..=completions {
            h.run_phase();
            let expected = if n % interval as u32 == 0 {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            };
            prop_assert_eq!(h.engine.phase(), expected);
            h.run_phase();
        }
        prop_assert_eq!(h.engine.completed_work_sessions(), completions);
    }

    #[test]
    fn tick_handle_tracks_running(commands in prop::collection::vec(command(), 1..40)) {
        let mut h = Harness::with_minutes(1, 1, 1, 2);
        for cmd in commands {
            match cmd {
                Command::Start => { h.engine.start(); }
                Command::Stop => { h.engine.stop(); }
                Command::Toggle => { h.engine.toggle(); }
                Command::Reset => { h.engine.reset(); }
                Command::Tick(n) => { h.tick_n(u64::from(n)); }
            }
            prop_assert_eq!(h.engine.has_tick_handle(), h.engine.is_running());
            prop_assert_eq!(h.rec.borrow().live_handle.is_some(), h.engine.is_running());
            let notes = h.rec.borrow().notifications.len() as u32;
            prop_assert!(h.engine.completed_work_sessions() <= notes);
        }
    }

    #[test]
    fn reset_always_lands_on_stopped_work(commands in prop::collection::vec(command(), 0..30)) {
        let mut h = Harness::with_minutes(1, 1, 1, 2);
        for cmd in commands {
            match cmd {
                Command::Start => { h.engine.start(); }
                Command::Stop => { h.engine.stop(); }
                Command::Toggle => { h.engine.toggle(); }
                Command::Reset => { h.engine.reset(); }
                Command::Tick(n) => { h.tick_n(u64::from(n)); }
            }
        }
        h.engine.reset();
        prop_assert_eq!(h.engine.phase(), Phase::Work);
        prop_assert!(!h.engine.is_running());
        prop_assert_eq!(h.engine.remaining_seconds(), 60);
    }
}
