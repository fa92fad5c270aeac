pub mod classifier;
pub mod extractor;
pub mod locator;
pub mod number;
pub mod orchestrator;
pub mod summary;

pub use classifier::ExpenseClassifier;
pub use locator::{HeaderScanLayout, SectionKind, SectionLayout, SectionLocation};
pub use number::normalize;
pub use orchestrator::{monthly_series, reconcile, Ingestor};
pub use summary::extract_summary;
