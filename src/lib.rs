//! Extracts integers and words from free text, classifies each integer
//! against the Fibonacci sequence and saves a CSV report plus a JSON word
//! count to object storage.

pub mod analysis;
pub mod error;
pub mod handler;
pub mod report;
pub mod settings;
pub mod store;

pub use analysis::{analyze, Analysis, ClassificationRow};
pub use error::{AnalysisError, StorageError};
pub use handler::{handle, Request, Response};
pub use settings::Settings;
