use crate::cli::ExtractArgs;
use crate::commands::pipeline::{extract_options, load_document, report_extraction, resolve_path};
use crate::config::Config;
use crate::session::{Session, TokenSource};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn run_extract(args: &ExtractArgs, root: &Path, config: &Config) -> Result<()> {
    let document = load_document(&resolve_path(root, &args.document))?;
    let options = extract_options(config, args.no_fallback);

    let (session, summary) = Session::new().extract(&document, &options);
    report_extraction(&summary);

    let Some(TokenSource::Extracted(tokens)) = &session.tokens else {
        anyhow::bail!("Extraction produced no token model");
    };
    let json = tokens.to_json_pretty().context("Failed to encode tokens")?;

    match &args.output {
        Some(output) => {
            let path = resolve_path(root, output);
            fs::write(&path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Extracted {} token(s) to {}", summary.tokens, path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
