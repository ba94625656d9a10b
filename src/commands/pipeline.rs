//! Steps shared by the token commands: load tokens into a session, convert, write, publish.
//!
//! Flag values always win; anything unset falls back to tokenpress.toml.

use crate::cli::{InputOptions, PublishOptions};
use crate::config::Config;
use crate::extractor::{DocumentSnapshot, ExtractOptions};
use crate::formatter::GeneratorRegistry;
use crate::publish::{GitHubClient, PublishError, PublishReport};
use crate::session::{ConvertOptions, ExtractSummary, Session};
use crate::types::GeneratedFile;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Resolve a command-line path against the project root.
pub(crate) fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

pub(crate) fn extract_options(config: &Config, no_fallback: bool) -> ExtractOptions {
    ExtractOptions {
        fallback: config.fallback && !no_fallback,
    }
}

pub(crate) fn load_document(path: &Path) -> Result<DocumentSnapshot> {
    DocumentSnapshot::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

pub(crate) fn report_extraction(summary: &ExtractSummary) {
    if let Some(warning) = &summary.warning {
        tracing::warn!("{}", warning);
    }
    if summary.skipped > 0 {
        tracing::warn!("Skipped {} unusable style(s) or node(s)", summary.skipped);
    }
    tracing::debug!(tokens = summary.tokens, "Extraction finished");
}

/// Load the session's tokens from a token file or, with `--document`, a snapshot.
pub(crate) fn load_session(input: &InputOptions, root: &Path, config: &Config) -> Result<Session> {
    let path = resolve_path(root, &input.input);

    if input.document {
        let document = load_document(&path)?;
        let options = extract_options(config, input.no_fallback);
        let (session, summary) = Session::new().extract(&document, &options);
        report_extraction(&summary);
        return Ok(session);
    }

    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let session = Session::new()
        .load_json(&content)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(session)
}

/// Generate the requested formats, or the configured defaults.
pub(crate) fn convert_session(
    session: Session,
    input: &InputOptions,
    config: &Config,
) -> Result<Session> {
    let formats = if input.formats.is_empty() {
        config.default_formats()
    } else {
        input.formats.clone()
    };
    let mut generate = config.generate_options();
    if let Some(type_name) = &input.type_name {
        generate.type_name = type_name.clone();
    }
    let options = ConvertOptions {
        generate,
        limits: config.flatten_limits(),
    };

    Ok(session.convert(&GeneratorRegistry::new(), &formats, &options)?)
}

pub(crate) fn output_dir(out_dir: Option<&Path>, root: &Path, config: &Config) -> PathBuf {
    match out_dir {
        Some(dir) => resolve_path(root, dir),
        None => root.join(&config.output_dir),
    }
}

pub(crate) fn write_files(files: &[GeneratedFile], out_dir: &Path, dry_run: bool) -> Result<()> {
    if !dry_run {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    }

    for file in files {
        let path = out_dir.join(&file.file_name);
        if dry_run {
            println!("Would write: {} ({} bytes)", path.display(), file.content.len());
            continue;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Wrote");
    }

    if !dry_run {
        println!("Generated {} file(s) in {}", files.len(), out_dir.display());
    }
    Ok(())
}

/// Explicit token, else $GITHUB_TOKEN.
pub(crate) fn resolve_token(token: Option<&str>) -> Result<String, PublishError> {
    token
        .map(str::to_string)
        .or_else(|| env::var(TOKEN_ENV).ok())
        .filter(|t| !t.trim().is_empty())
        .ok_or(PublishError::MissingToken)
}

/// Client for the token, aimed at `[publish] api_base` when one is configured.
pub(crate) fn github_client(token: &str, config: &Config) -> Result<GitHubClient, PublishError> {
    let client = GitHubClient::new(token)?;
    let client = match config.publish.api_base.as_deref().map(str::trim) {
        Some(base) if !base.is_empty() => client.with_api_base(base),
        _ => client,
    };
    tracing::debug!(api_base = %client.api_base(), "GitHub client ready");
    Ok(client)
}

/// Verify the account, resolve the repository and push the session's files.
pub(crate) fn publish_session(
    session: Session,
    options: &PublishOptions,
    config: &Config,
) -> Result<PublishReport> {
    let repo = options
        .repo
        .clone()
        .or_else(|| config.publish.repo.clone())
        .filter(|r| !r.trim().is_empty())
        .ok_or(PublishError::MissingRepository)?;
    let token = resolve_token(options.token.as_deref())?;
    if session.files.is_empty() {
        return Err(PublishError::NothingToPublish.into());
    }

    let client = github_client(&token, config)?;
    let session = session.login(&client, Some(repo.as_str()))?;

    let branch = options
        .branch
        .as_deref()
        .or(config.publish.branch.as_deref());
    let message = options
        .message
        .as_deref()
        .unwrap_or(&config.publish.message);
    let directory = options
        .directory
        .as_deref()
        .unwrap_or(&config.publish.directory);

    let report = session
        .publish(&client, branch, message, directory)
        .context("Push failed")?;

    for path in &report.created {
        println!("Created: {}", path);
    }
    for path in &report.updated {
        println!("Updated: {}", path);
    }
    if let Some(resolved) = &session.repository {
        println!(
            "Pushed {} file(s) to {}",
            report.total(),
            resolved.repository.full_name
        );
    }
    Ok(report)
}
