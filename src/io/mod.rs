/// CSV export of analysis results.
pub mod export;
