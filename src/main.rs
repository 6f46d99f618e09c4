use std::io::{self, Write};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;

use chess_duel::console::console_top::{run_stdio_loop, snapshot_summary};
use chess_duel::session::notifier::ChannelNotifier;
use chess_duel::session::snapshot::GameSnapshot;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    // Stdout carries the console protocol, so diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let (snapshot_tx, snapshot_rx) = channel::<GameSnapshot>();

    // Printer thread: one summary line per committed mutation, in order.
    let printer = thread::spawn(move || {
        for snapshot in snapshot_rx {
            println!("{}", snapshot_summary(&snapshot));
            io::stdout().flush().ok();
        }
    });

    let result = run_stdio_loop(Arc::new(ChannelNotifier::new(snapshot_tx)));
    // The loop owned the only sender, so the printer drains and exits.
    printer.join().ok();
    result
}
