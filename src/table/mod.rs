//! Table building blocks shared by generation tasks.

pub mod indexed;
pub mod name_blob;

pub use indexed::{content_key, ContentKey, IndexedDataTable};
pub use name_blob::NameBlob;
