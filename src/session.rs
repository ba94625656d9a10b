//! @dose
//! purpose: The explicit session context: the current token source, the files generated from
//!     it, and the connected account/repository. Every step consumes the session and returns
//!     the next one.
//!
//! when-editing:
//!     - !Loading new tokens (extract or upload) clears previously generated files
//!     - Converting replaces the file list wholesale
//!
//! invariants:
//!     - `files` were always generated from the current `tokens`
//!     - Publishing requires a verified account and a resolved repository
//!
//! flows:
//!     - extract|load_json -> convert -> export_bundle | (login -> publish)

use crate::export::{self, ExportError};
use crate::extractor::{extract_tokens, ExtractOptions, StyleDocument};
use crate::formatter::{
    flatten_json, flatten_model, ConvertError, FlattenLimits, GenerateOptions, GeneratorRegistry,
};
use crate::publish::{
    self, verify_account, Account, ContentStore, PublishError, PublishReport, PublishTarget,
    ResolvedRepository,
};
use crate::types::{FlatTokens, Format, GeneratedFile, TokenModel};
use serde_json::Value;

/// Where the current tokens came from
#[derive(Debug, Clone, PartialEq)]
pub enum TokenSource {
    Extracted(TokenModel),
    /// An uploaded JSON document, used as-is
    Uploaded(Value),
}

impl TokenSource {
    pub fn flatten(&self, limits: &FlattenLimits) -> Result<FlatTokens, ConvertError> {
        match self {
            TokenSource::Extracted(model) => Ok(flatten_model(model)),
            TokenSource::Uploaded(value) => Ok(flatten_json(value, limits)?),
        }
    }
}

/// Outcome of loading tokens from a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractSummary {
    pub tokens: usize,
    pub skipped: usize,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub generate: GenerateOptions,
    pub limits: FlattenLimits,
}

#[derive(Debug, Default)]
pub struct Session {
    pub tokens: Option<TokenSource>,
    pub files: Vec<GeneratedFile>,
    pub account: Option<Account>,
    pub repository: Option<ResolvedRepository>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract tokens from a document. Never fails; problems end up in the summary.
    pub fn extract<D: StyleDocument + ?Sized>(
        self,
        doc: &D,
        options: &ExtractOptions,
    ) -> (Self, ExtractSummary) {
        let extraction = extract_tokens(doc, options);
        let summary = ExtractSummary {
            tokens: extraction.tokens.len(),
            skipped: extraction.skipped,
            warning: extraction.warning,
        };
        (self.with_tokens(TokenSource::Extracted(extraction.tokens)), summary)
    }

    /// Load an uploaded token file. Any valid JSON is accepted.
    pub fn load_json(self, content: &str) -> Result<Self, ConvertError> {
        let value: Value = serde_json::from_str(content)?;
        Ok(self.with_tokens(TokenSource::Uploaded(value)))
    }

    fn with_tokens(self, tokens: TokenSource) -> Self {
        Self {
            tokens: Some(tokens),
            files: Vec::new(),
            ..self
        }
    }

    /// Generate one file per format from the current tokens.
    pub fn convert(
        self,
        registry: &GeneratorRegistry,
        formats: &[Format],
        options: &ConvertOptions,
    ) -> Result<Self, ConvertError> {
        if formats.is_empty() {
            return Err(ConvertError::NoFormats);
        }
        let source = self.tokens.as_ref().ok_or(ConvertError::NoTokens)?;
        let flat = source.flatten(&options.limits)?;
        tracing::debug!(entries = flat.len(), "Flattened tokens");

        let files = registry.generate_files(&flat, formats, &options.generate)?;
        Ok(Self { files, ..self })
    }

    pub fn export_bundle(&self) -> Result<String, ExportError> {
        export::bundle(&self.files)
    }

    /// Verify the credential and, when given, resolve the repository.
    pub fn login<S: ContentStore + ?Sized>(
        self,
        store: &S,
        repository: Option<&str>,
    ) -> Result<Self, PublishError> {
        let account = verify_account(store)?;
        tracing::info!(login = %account.login, "Connected");

        let repository = match repository.map(str::trim).filter(|r| !r.is_empty()) {
            Some(identifier) => Some(publish::resolve_repository(store, identifier)?),
            None => None,
        };

        Ok(Self {
            account: Some(account),
            repository,
            ..self
        })
    }

    /// Push the generated files to the connected repository.
    ///
    /// `branch` defaults to the repository's default branch.
    pub fn publish<S: ContentStore + ?Sized>(
        &self,
        store: &S,
        branch: Option<&str>,
        message: &str,
        directory: &str,
    ) -> Result<PublishReport, PublishError> {
        if self.account.is_none() {
            return Err(PublishError::MissingToken);
        }
        let resolved = self
            .repository
            .as_ref()
            .ok_or(PublishError::MissingRepository)?;
        if self.files.is_empty() {
            return Err(PublishError::NothingToPublish);
        }

        let branch = branch
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(resolved.repository.default_branch.as_str());
        if !resolved.branches.is_empty() && !resolved.has_branch(branch) {
            tracing::warn!(branch = %branch, "Branch not found in repository branch list");
        }

        let target = PublishTarget {
            message: message.to_string(),
            directory: directory.to_string(),
            ..PublishTarget::new(resolved.repository.full_name.clone(), branch)
        };
        publish::publish(store, &target, &self.files)
    }
}
