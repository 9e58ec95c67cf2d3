pub mod analyze;
pub mod html;
pub mod pipeline;
pub mod positions;
pub mod report;
pub mod scoring;

pub use analyze::Analyzer;
pub use html::render_html;
pub use pipeline::{NoSentiment, ScoringPipeline, SentimentLookup};
pub use report::AnalysisReport;
