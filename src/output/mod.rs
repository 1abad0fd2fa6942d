pub mod formatter;
pub mod writer;

pub use formatter::{clean_text, format_proposal, summary_stats, SummaryStats};
pub use writer::ResultWriter;
