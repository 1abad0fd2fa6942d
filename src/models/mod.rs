pub mod message;
pub mod proposal;
pub mod search;

pub use message::*;
pub use proposal::*;
pub use search::*;
