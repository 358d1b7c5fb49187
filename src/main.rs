use std::{fs, io, path::PathBuf, process};

use clap::Parser;
use curvelang::{render::ConsoleRenderer, run};

/// curvelang samples the curves described by a script and prints what it
/// draws.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Do not wait for Enter when the script says `show`.
    #[arg(long)]
    no_wait: bool,

    /// Print every accepted point of a curve when it is drawn.
    #[arg(short, long)]
    points: bool,

    /// Path of the script to run.
    path: PathBuf,
}

#[cfg(unix)]
extern "C" fn on_interrupt(_: libc::c_int) {
    // SAFETY: `_exit` is async-signal-safe.
    unsafe { libc::_exit(0) }
}

/// Makes an interrupt end the process with a success status.
#[cfg(unix)]
fn exit_on_interrupt() {
    let handler = on_interrupt as extern "C" fn(libc::c_int);
    // SAFETY: the handler only calls an async-signal-safe function.
    unsafe {
        libc::signal(libc::SIGINT, handler as libc::sighandler_t);
    }
}

#[cfg(not(unix))]
const fn exit_on_interrupt() {}

fn main() {
    let args = Args::parse();
    exit_on_interrupt();

    let script = fs::read_to_string(&args.path).unwrap_or_else(|e| {
                                                   eprintln!("Failed to read the script '{}': {e}",
                                                             args.path.display());
                                                   process::exit(1);
                                               });

    let renderer = ConsoleRenderer::new(io::stdout().lock(), !args.no_wait, args.points);
    if let Err(e) = run(&script, renderer) {
        eprintln!("{e}");
        process::exit(1);
    }
}
