use crate::cli::LoginArgs;
use crate::commands::pipeline::{github_client, resolve_token};
use crate::config::Config;
use crate::session::Session;
use anyhow::Result;
use std::path::Path;

pub fn run_login(args: &LoginArgs, _root: &Path, config: &Config) -> Result<()> {
    let token = resolve_token(args.token.as_deref())?;
    let client = github_client(&token, config)?;

    let repo = args.repo.as_deref().or(config.publish.repo.as_deref());
    let session = Session::new().login(&client, repo)?;

    if let Some(account) = &session.account {
        println!("Logged in as {} ({})", account.display_name(), account.login);
    }

    if let Some(resolved) = &session.repository {
        let repository = &resolved.repository;
        println!(
            "Repository: {} (default branch: {}{})",
            repository.full_name,
            repository.default_branch,
            if repository.private { ", private" } else { "" }
        );
        if resolved.branches.is_empty() {
            println!("Branches: unavailable");
        } else {
            let names: Vec<&str> = resolved.branches.iter().map(|b| b.name.as_str()).collect();
            println!("Branches: {}", names.join(", "));
        }
    }

    Ok(())
}
