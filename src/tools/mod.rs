pub mod check_index;
pub mod export_index;
pub(crate) mod format;
pub mod get_entry;
pub mod inspect_index;
pub mod list_entries;
pub mod set_index;

pub use check_index::*;
pub use export_index::*;
pub use get_entry::*;
pub use inspect_index::*;
pub use list_entries::*;
pub use set_index::*;
