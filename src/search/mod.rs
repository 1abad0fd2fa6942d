pub mod provider;
pub mod serper;

pub use provider::{web_search_spec, SearchTool, WEB_SEARCH_TOOL};
pub use serper::SerperClient;
