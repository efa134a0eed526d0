mod log_level;
mod path_list;
mod requests;

pub use log_level::LogLevel;
pub use path_list::PathList;
pub use requests::{Refresh, RequestParseError, Selection};
