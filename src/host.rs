//! @dose
//! purpose: Typed request/response contract between the UI side and the document side of the
//!     host application, plus a JSON-lines loop serving it over any reader/writer pair.
//!
//! when-editing:
//!     - !Wire names are kebab-case in a `type` field; UIs depend on them
//!     - Only `extract-tokens` answers; `notify` and `close-plugin` are fire-and-forget
//!
//! invariants:
//!     - Exactly one response per `extract-tokens` request
//!     - A malformed line yields an `error` response and the loop keeps going
//!     - The loop ends on `close-plugin` or end of input
//!
//! gotchas:
//!     - Extraction never fails outright; a partial model is sent with `warning` set
//!     - Only the latest `notify` message is kept; a long session must not grow memory

use crate::extractor::{extract_tokens, ExtractOptions, StyleDocument};
use crate::types::TokenModel;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Host channel I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// UI -> document side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostRequest {
    ExtractTokens,
    Notify { message: String },
    ClosePlugin,
}

/// Document side -> UI
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostResponse {
    TokensExtracted {
        tokens: TokenModel,
        #[serde(skip_serializing_if = "Option::is_none")]
        warning: Option<String>,
    },
    Error {
        message: String,
    },
}

/// The document side of the host.
pub struct Host<D> {
    document: D,
    options: ExtractOptions,
    last_notice: Option<String>,
    closed: bool,
}

impl<D: StyleDocument> Host<D> {
    pub fn new(document: D, options: ExtractOptions) -> Self {
        Self {
            document,
            options,
            last_notice: None,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Most recent message received through `notify`
    pub fn last_notice(&self) -> Option<&str> {
        self.last_notice.as_deref()
    }

    pub fn handle(&mut self, request: HostRequest) -> Option<HostResponse> {
        match request {
            HostRequest::ExtractTokens => {
                let extraction = extract_tokens(&self.document, &self.options);
                if let Some(warning) = &extraction.warning {
                    tracing::warn!("{}", warning);
                }
                tracing::debug!(
                    tokens = extraction.tokens.len(),
                    skipped = extraction.skipped,
                    "Extracted"
                );
                Some(HostResponse::TokensExtracted {
                    tokens: extraction.tokens,
                    warning: extraction.warning,
                })
            }
            HostRequest::Notify { message } => {
                tracing::info!("{}", message);
                self.last_notice = Some(message);
                None
            }
            HostRequest::ClosePlugin => {
                self.closed = true;
                None
            }
        }
    }

    /// Serve JSON-lines requests until `close-plugin` or end of input.
    pub fn serve<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> Result<(), HostError> {
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<HostRequest>(&line) {
                Ok(request) => self.handle(request),
                Err(e) => Some(HostResponse::Error {
                    message: format!("Invalid message: {}", e),
                }),
            };

            if let Some(response) = response {
                serde_json::to_writer(&mut writer, &response)?;
                writer.write_all(b"\n")?;
                writer.flush()?;
            }

            if self.closed {
                break;
            }
        }
        Ok(())
    }
}
