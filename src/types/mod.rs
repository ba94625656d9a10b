mod output;
mod tokens;

pub use output::*;
pub use tokens::*;
