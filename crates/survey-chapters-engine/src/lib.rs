pub mod codec;
pub mod editing;
pub mod io;
pub mod models;
pub mod naming;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use codec::{ChapterCodec, CodecSettings, PatternCodec, SiteSettings, TreeCodec};
pub use editing::{Cmd, EditError, LabelField, Patch};
pub use io::*;
pub use models::*;
pub use naming::NamingError;
