use crate::cli::ConvertArgs;
use crate::commands::pipeline::{
    convert_session, load_session, output_dir, publish_session, write_files,
};
use crate::config::Config;
use anyhow::Result;
use std::path::Path;

pub fn run_convert(args: &ConvertArgs, root: &Path, config: &Config) -> Result<()> {
    let session = load_session(&args.input, root, config)?;
    let session = convert_session(session, &args.input, config)?;

    let out_dir = output_dir(args.out_dir.as_deref(), root, config);
    write_files(&session.files, &out_dir, args.dry_run)?;

    if args.push {
        if args.dry_run {
            println!("Dry run: skipping push");
        } else {
            publish_session(session, &args.publish, config)?;
        }
    }

    Ok(())
}
