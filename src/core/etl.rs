use crate::core::{Pipeline, RunSummary};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    name: String,
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            name: crate::config::DEFAULT_PIPELINE_NAME.to_string(),
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Name shown in run logs.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs extract, transform and load in order. Output is written only
    /// when every row has been transformed.
    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting normalization run '{}'", self.name);

        // Extract
        let extracted = self.pipeline.extract()?;
        self.monitor.log_phase("Extract");

        // Transform
        let transformed = self.pipeline.transform(extracted)?;
        tracing::info!(
            "Transformed {} of {} rows ({} dropped)",
            transformed.summary.rows_written,
            transformed.summary.rows_read,
            transformed.summary.rows_dropped()
        );
        self.monitor.log_phase("Transform");

        // Load
        let summary = self.pipeline.load(transformed)?;
        self.monitor.log_phase("Load");
        self.monitor.log_summary(&summary);
        tracing::info!("Run '{}' finished", self.name);

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Extracted, TransformResult};
    use crate::domain::model::RawLine;
    use crate::utils::error::EtlError;
    use std::cell::RefCell;

    /// Records which phases ran.
    struct TracingPipeline {
        phases: RefCell<Vec<&'static str>>,
        fail_transform: bool,
    }

    impl Pipeline for TracingPipeline {
        fn extract(&self) -> Result<Extracted> {
            self.phases.borrow_mut().push("extract");
            let lines: Vec<Result<RawLine>> = Vec::new();
            Ok(Extracted {
                header: b"h".to_vec(),
                lines: Box::new(lines.into_iter()),
            })
        }

        fn transform(&self, input: Extracted) -> Result<TransformResult> {
            self.phases.borrow_mut().push("transform");
            if self.fail_transform {
                return Err(EtlError::MalformedHeaderError);
            }
            let mut result = TransformResult::default();
            result.lines.push(input.header);
            Ok(result)
        }

        fn load(&self, result: TransformResult) -> Result<RunSummary> {
            self.phases.borrow_mut().push("load");
            Ok(result.summary)
        }
    }

    #[test]
    fn test_run_executes_all_phases() {
        let engine = EtlEngine::new(TracingPipeline {
            phases: RefCell::new(Vec::new()),
            fail_transform: false,
        });
        assert!(engine.run().is_ok());
        assert_eq!(
            *engine.pipeline.phases.borrow(),
            vec!["extract", "transform", "load"]
        );
    }

    #[test]
    fn test_engine_name_defaults_and_overrides() {
        let pipeline = || TracingPipeline {
            phases: RefCell::new(Vec::new()),
            fail_transform: false,
        };
        assert_eq!(EtlEngine::new(pipeline()).name(), "csv-normalizer");
        assert_eq!(
            EtlEngine::new(pipeline()).with_name("nightly-clean").name(),
            "nightly-clean"
        );
    }

    #[test]
    fn test_failed_transform_skips_load() {
        let engine = EtlEngine::new(TracingPipeline {
            phases: RefCell::new(Vec::new()),
            fail_transform: true,
        });
        assert!(engine.run().is_err());
        assert_eq!(*engine.pipeline.phases.borrow(), vec!["extract", "transform"]);
    }
}
