use crate::cli::HostArgs;
use crate::commands::pipeline::{extract_options, load_document, resolve_path};
use crate::config::Config;
use crate::host::Host;
use anyhow::{Context, Result};
use std::io;
use std::path::Path;

/// Serve the host contract on stdin/stdout until `close-plugin` or EOF.
pub fn run_host(args: &HostArgs, root: &Path, config: &Config) -> Result<()> {
    let document = load_document(&resolve_path(root, &args.document))?;
    let mut host = Host::new(document, extract_options(config, args.no_fallback));

    tracing::debug!("Host ready");
    host.serve(io::stdin().lock(), io::stdout().lock())
        .context("Host channel failed")?;
    tracing::debug!(
        closed = host.is_closed(),
        last_notice = ?host.last_notice(),
        "Host stopped"
    );
    Ok(())
}
