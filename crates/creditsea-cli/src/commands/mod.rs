//! Command implementations.

pub mod extract;
pub mod list;
pub mod show;
pub mod upload;

pub use self::extract::{execute_extract, extract_file};
pub use self::list::execute_list;
pub use self::show::execute_show;
pub use self::upload::execute_upload;
