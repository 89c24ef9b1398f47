/* 📖 # Why have nearmatch_base as a core library?
nearmatch_base provides the error handling and tracing setup shared by the engine and the CLI.
Keeping it separate means the engine never depends on anything binary-specific.
*/

pub mod error;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, NearmatchError, NearmatchResult, ResultExt};
