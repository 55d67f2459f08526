pub mod sort_key;

pub use sort_key::{Reorder, SortOrder};
