pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, StderrSink};
pub use config::{RunConfig, TomlConfig};
pub use crate::core::{etl::EtlEngine, pipeline::NormalizePipeline};
pub use utils::error::{EtlError, Result};
