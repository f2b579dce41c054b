//! Interactive status-bar session.
//!
//! Runs the engine on a single-threaded tokio loop. The loop is the only
//! place that calls into the engine, so callbacks never overlap:
//!
//! - the one-second interval exists only while the engine holds a tick handle
//! - settings notifications arrive over a channel and become `apply_config()`
//! - stdin lines are the command surface (`toggle`, `reset`, `prefs`, ...)

use std::rc::Rc;

use clap::Args;
use pomobar_core::{Event, PomodoroEngine, Result, SettingsStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::host::{ArmedTick, TerminalDisplay, TerminalNotifier, TickSlot};

const HELP: &str = "commands: toggle (t), reset (r), prefs (p), set <key> <value>, status (s), help (h), quit (q)";

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Start the countdown immediately
    #[arg(long)]
    pub autostart: bool,
    /// Tick this many times faster than real time (for demos)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=3600))]
    pub speed: u32,
}

/// What the loop should do after handling a stdin line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run(args: RunArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(session(args));
    // A blocked stdin read would otherwise keep the runtime alive after `quit`.
    runtime.shutdown_background();
    result
}

async fn session(args: RunArgs) -> Result<()> {
    let settings = Rc::new(SettingsStore::load()?);
    if let Some(path) = settings.path() {
        info!(path = %path.display(), "settings loaded");
    }

    let slot = TickSlot::default();
    let mut engine = PomodoroEngine::new(
        settings.clone(),
        Box::new(TerminalDisplay::new()),
        Box::new(TerminalNotifier::new(settings.notifications_enabled())),
        Box::new(slot.scheduler(args.speed)),
    );

    let (change_tx, mut change_rx) = mpsc::unbounded_channel::<()>();
    engine.watch_settings(Box::new(move || {
        // The receiver only goes away once the loop has exited.
        let _ = change_tx.send(());
    }));

    if args.autostart {
        log_event(engine.start());
    }
    eprintln!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');
    let mut interval: Option<(ArmedTick, Interval)> = None;

    loop {
        sync_interval(&slot, &mut interval);
        tokio::select! {
            // Pending settings changes land before the next command is read.
            biased;
            _ = next_tick(&mut interval) => {
                log_event(engine.tick());
            }
            Some(()) = change_rx.recv() => {
                log_event(engine.apply_config());
            }
            line = lines.next_segment() => {
                match line? {
                    Some(bytes) => {
                        // Garbage on stdin becomes an unknown command, not a dead session.
                        let line = String::from_utf8_lossy(&bytes);
                        if handle_line(&mut engine, &settings, line.trim())? == Flow::Quit {
                            break;
                        }
                    }
                    None => {
                        debug!("stdin closed");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    engine.dispose();
    Ok(())
}

fn handle_line(
    engine: &mut PomodoroEngine,
    settings: &SettingsStore,
    line: &str,
) -> Result<Flow> {
    let mut words = line.split_whitespace();
    match words.next() {
        None => {}
        Some("toggle" | "t") => log_event(engine.toggle()),
        Some("reset" | "r") => log_event(engine.reset()),
        Some("prefs" | "p") => open_preferences(settings)?,
        Some("status" | "s") => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        Some("set") => match (words.next(), words.next()) {
            (Some(key), Some(value)) => {
                if let Err(e) = settings.set_from_str(key, value) {
                    warn!(error = %e, "setting rejected");
                    eprintln!("error: {e}");
                }
            }
            _ => eprintln!("usage: set <key> <value>"),
        },
        Some("help" | "h") => eprintln!("{HELP}"),
        Some("quit" | "q" | "exit") => return Ok(Flow::Quit),
        Some(other) => eprintln!("unknown command: {other}. {HELP}"),
    }
    Ok(Flow::Continue)
}

/// Pass-through for the host's preferences surface: show what can be edited.
fn open_preferences(settings: &SettingsStore) -> Result<()> {
    print!("{}", toml::to_string_pretty(&settings.config())?);
    if let Some(path) = settings.path() {
        println!("# edit with `set <key> <value>` or in {}", path.display());
    }
    Ok(())
}

/// Rebuild the interval whenever the armed tick changes; drop it when disarmed.
fn sync_interval(slot: &TickSlot, interval: &mut Option<(ArmedTick, Interval)>) {
    let armed = slot.current();
    if interval.as_ref().map(|(tick, _)| *tick) == armed {
        return;
    }
    *interval = armed.map(|tick| {
        let mut timer = tokio::time::interval_at(Instant::now() + tick.period, tick.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        (tick, timer)
    });
}

async fn next_tick(interval: &mut Option<(ArmedTick, Interval)>) {
    match interval {
        Some((_, timer)) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn log_event(event: Option<Event>) {
    let Some(event) = event else { return };
    match serde_json::to_string(&event) {
        Ok(json) => debug!(event = %json, "engine event"),
        Err(e) => warn!(error = %e, "could not serialize event"),
    }
}
