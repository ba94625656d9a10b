mod convert;
mod export;
mod extract;
mod host;
mod login;
mod pipeline;
mod publish;
mod watch;

pub use convert::*;
pub use export::*;
pub use extract::*;
pub use host::*;
pub use login::*;
pub use publish::*;
pub use watch::*;
