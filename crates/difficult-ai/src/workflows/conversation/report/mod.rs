mod document;
mod summary;

pub use document::ScorecardDocument;
pub use summary::{render_summary, ScorecardSummary};
