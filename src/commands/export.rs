use crate::cli::ExportArgs;
use crate::commands::pipeline::{convert_session, load_session};
use crate::config::Config;
use crate::export::{copy_to_clipboard, holds_selection};
use anyhow::Result;
use std::path::Path;

pub fn run_export(args: &ExportArgs, root: &Path, config: &Config) -> Result<()> {
    let session = load_session(&args.input, root, config)?;
    let session = convert_session(session, &args.input, config)?;
    let bundle = session.export_bundle()?;

    if args.stdout {
        print!("{}", bundle);
        return Ok(());
    }

    if holds_selection() {
        println!("Holding the clipboard until another program takes it (Ctrl+C to give up)...");
    }
    copy_to_clipboard(&bundle)?;
    println!("Copied {} file(s) to clipboard", session.files.len());
    Ok(())
}
