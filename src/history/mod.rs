//! History subsystem.
//!
//! # Data Flow
//! ```text
//! ?path=History/Id123
//!     → path.rs (validate, normalize)
//!     → reader.rs (SubtreeSource::fetch → flatten → sort desc)
//!     → Vec<HistoryNode> { key, children: [FieldEntry { key, data }] }
//! ```

pub mod path;
pub mod reader;
pub mod types;

pub use path::{validate_path, DbPath, PathError};
pub use reader::{flatten_subtree, HistoryReader, SubtreeSource};
pub use types::{FieldEntry, HistoryNode};
