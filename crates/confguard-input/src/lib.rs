//! Input adapters: reading files or standard input, splitting multi-document
//! content, combining files for cross-file evaluation, and decoding raw bytes
//! into structured values by extension.

pub mod combine;
pub mod decode;
pub mod read;
pub mod split;

pub use combine::combine_files;
pub use decode::Format;
pub use read::read_input;
pub use split::{LineEnding, split_documents};
