//! Pure transformations used by the fetcher.

mod age;
mod naming;

pub use age::{file_age, is_fresh, truncate_to_secs};
pub use naming::{destination_for, file_name_from_url};
