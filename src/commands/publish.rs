use crate::cli::PublishArgs;
use crate::commands::pipeline::{convert_session, load_session, publish_session};
use crate::config::Config;
use anyhow::Result;
use std::path::Path;

pub fn run_publish(args: &PublishArgs, root: &Path, config: &Config) -> Result<()> {
    let session = load_session(&args.input, root, config)?;
    let session = convert_session(session, &args.input, config)?;
    publish_session(session, &args.publish, config)?;
    Ok(())
}
