pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{Extracted, RunSummary, TransformResult};
pub use crate::domain::ports::{ConfigProvider, DiagnosticSink, Pipeline, Storage};
pub use crate::utils::error::Result;
