//! @dose
//! purpose: This is the library crate root for tokenpress, exposing the public API for use as both
//!     a CLI tool and a library. It re-exports the token model, the extractor, the generators,
//!     the publisher and the session for convenient access by consumers.
//!
//! when-editing:
//!     - !All public modules must be declared here with pub mod
//!     - !Re-exports should include commonly used types and functions
//!     - Keep the re-export list organized by module
//!
//! invariants:
//!     - All output formats are reachable through GeneratorRegistry
//!     - Every remote operation goes through the ContentStore trait
//!
//! do-not:
//!     - Never expose internal implementation details
//!
//! gotchas:
//!     - The lib.rs is separate from main.rs - library consumers get lib, CLI gets main
//!     - `commands` is public only so the binary can dispatch to it

pub mod cli;
pub mod commands;
pub mod config;
pub mod export;
pub mod extractor;
pub mod formatter;
pub mod host;
pub mod logging;
pub mod publish;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use cli::{Cli, Commands};
pub use config::Config;
pub use extractor::{extract_tokens, DocumentSnapshot, ExtractOptions, Extraction, StyleDocument};
pub use formatter::{
    flatten_json, flatten_model, ConvertError, FormatGenerator, GenerateOptions, GeneratorRegistry,
};
pub use host::{Host, HostRequest, HostResponse};
pub use publish::{ContentStore, GitHubClient, PublishError, PublishReport, PublishTarget};
pub use session::{Session, TokenSource};
pub use types::{FlatTokens, FlatValue, Format, GeneratedFile, TokenModel};
