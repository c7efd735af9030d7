// Static dashboard data, report export and data-entry helpers

pub mod catalog;
pub mod input;
pub mod report;
pub mod upload;

pub use catalog::{insights, Category, Trend};
pub use input::{process_transcript, suggest, MissingFields, SuggestionRequest, TranscriptRequest};
pub use report::{report_csv, report_document, report_sections, MetricLeaf};
pub use upload::{reduce_csv, CsvSummary, UploadError};
