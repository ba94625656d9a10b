//! @dose
//! purpose: Implements the watch command that monitors a token file (or document snapshot)
//!     and regenerates the platform files whenever it changes.
//!
//! when-editing:
//!     - !Debouncing is critical for handling rapid file changes (editor saves write twice)
//!     - Uses notify crate for cross-platform file system watching
//!
//! invariants:
//!     - Initial conversion runs before watching starts
//!     - Config file changes reload tokenpress.toml and regenerate
//!     - A failed regeneration is reported and the loop keeps watching
//!
//! gotchas:
//!     - The input's parent directory is watched, not the file itself; editors often replace
//!         files on save, which would orphan a watch on the file
//!     - Generated files may land in the watched directory; only the input and config file
//!         names trigger work
//!
//! flows:
//!     - Initial: load, convert, write
//!     - Watch: receive notify events, filter by file name, debounce
//!     - Update: reload config if needed, regenerate everything

use crate::cli::WatchArgs;
use crate::commands::pipeline::{
    convert_session, load_session, output_dir, resolve_path, write_files,
};
use crate::config::{Config, CONFIG_FILE};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// What changed since the last regeneration
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Pending {
    input: bool,
    config: bool,
}

impl Pending {
    fn any(&self) -> bool {
        self.input || self.config
    }
}

pub fn run_watch(args: &WatchArgs, root: &Path, config: &Config) -> Result<()> {
    let mut config = config.clone();
    let input = resolve_path(root, &args.input.input);
    let input_name = input
        .file_name()
        .map(OsStr::to_os_string)
        .with_context(|| format!("Not a file: {}", input.display()))?;

    println!("Running initial conversion...");
    if let Err(e) = regenerate(args, root, &config) {
        eprintln!("Error: {:#}", e);
    }

    // Set up file watcher
    let (tx, rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        notify::Config::default(),
    )?;

    let input_dir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    let mut watch_dirs: Vec<PathBuf> = vec![input_dir];
    if !same_dir(&watch_dirs[0], root) {
        watch_dirs.push(root.to_path_buf());
    }
    for dir in &watch_dirs {
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
        tracing::debug!("Watching: {}", dir.display());
    }

    println!(
        "Watching {} for changes... (press Ctrl+C to stop)",
        input.display()
    );

    // Event loop with debouncing
    let mut pending = Pending::default();
    let mut last_event = Instant::now();
    let debounce = Duration::from_millis(args.debounce);
    let poll_interval = Duration::from_millis(50);

    loop {
        match rx.recv_timeout(poll_interval) {
            Ok(event) => {
                if classify_event(&event, &input_name, &mut pending) {
                    last_event = Instant::now();
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if pending.any() && last_event.elapsed() >= debounce {
                    if args.clear {
                        // Clear terminal (ANSI escape code)
                        print!("\x1B[2J\x1B[1;1H");
                    }
                    let timestamp = clock_timestamp();
                    if pending.config {
                        println!("[{}] Config changed, reloading {}", timestamp, CONFIG_FILE);
                        config = Config::load(root);
                    }
                    pending = Pending::default();

                    match regenerate(args, root, &config) {
                        Ok(count) => println!("[{}] Regenerated {} file(s)", timestamp, count),
                        Err(e) => eprintln!("[{}] Error: {:#}", timestamp, e),
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                println!("Watcher disconnected");
                break;
            }
        }
    }

    Ok(())
}

/// Load, convert and write. Returns the number of files written.
fn regenerate(args: &WatchArgs, root: &Path, config: &Config) -> Result<usize> {
    let session = load_session(&args.input, root, config)?;
    let session = convert_session(session, &args.input, config)?;
    let out_dir = output_dir(args.out_dir.as_deref(), root, config);
    write_files(&session.files, &out_dir, false)?;
    Ok(session.files.len())
}

/// Record the event if it touches the input or the config file.
fn classify_event(event: &Event, input_name: &OsStr, pending: &mut Pending) -> bool {
    match &event.kind {
        EventKind::Create(_) | EventKind::Modify(_) => {}
        EventKind::Remove(_) => {
            tracing::debug!(paths = ?event.paths, "Removed");
            return false;
        }
        _ => return false,
    }

    let mut relevant = false;
    for path in &event.paths {
        match path.file_name() {
            Some(name) if name == input_name => {
                pending.input = true;
                relevant = true;
            }
            Some(name) if name == CONFIG_FILE => {
                pending.config = true;
                relevant = true;
            }
            _ => {}
        }
    }
    relevant
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// HH:MM:SS (UTC) without pulling in a date crate
fn clock_timestamp() -> String {
    use std::time::SystemTime;
    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();
    let hours = (secs / 3600) % 24;
    let mins = (secs / 60) % 60;
    let secs = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}
