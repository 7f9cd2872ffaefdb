use crate::core::{ExportSummary, Pipeline};
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract → transform → load. A failed extract never reaches load.
    pub async fn run(&self) -> Result<ExportSummary> {
        let started = Instant::now();
        tracing::info!("Starting mentor export");

        let raw_data = self.pipeline.extract().await?;
        let fetched = raw_data.len();
        tracing::info!("Extracted {} records", fetched);

        let result = self.pipeline.transform(raw_data).await?;
        let (excluded, skipped, kept) = (result.excluded, result.skipped, result.mentors.len());
        tracing::info!(
            "Transformed: {} kept, {} excluded, {} skipped",
            kept,
            excluded,
            skipped
        );

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to {} in {:?}", output_path, started.elapsed());

        Ok(ExportSummary {
            fetched,
            excluded,
            skipped,
            kept,
            output_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExportResult, Record};
    use crate::domain::model::Mentor;
    use crate::utils::error::EtlError;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubPipeline {
        fail_extract: bool,
        loaded: AtomicBool,
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<Vec<Record>> {
            if self.fail_extract {
                return Err(EtlError::HttpStatusError {
                    status: 502,
                    url: "http://stub".to_string(),
                });
            }
            Ok(vec![Record::default(), Record::default(), Record::default()])
        }

        async fn transform(&self, data: Vec<Record>) -> Result<ExportResult> {
            Ok(ExportResult {
                mentors: vec![Mentor {
                    name: "张三".to_string(),
                    avatar: String::new(),
                    homepage: String::new(),
                }],
                excluded: data.len() - 1,
                skipped: 0,
            })
        }

        async fn load(&self, _result: ExportResult) -> Result<String> {
            self.loaded.store(true, Ordering::SeqCst);
            Ok("/tmp/mentors.json".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_reports_counts() {
        let engine = EtlEngine::new(StubPipeline {
            fail_extract: false,
            loaded: AtomicBool::new(false),
        });

        let summary = engine.run().await.unwrap();

        assert_eq!(summary.fetched, 3);
        assert_eq!(summary.excluded, 2);
        assert_eq!(summary.kept, 1);
        assert_eq!(summary.output_path, "/tmp/mentors.json");
    }

    #[tokio::test]
    async fn test_failed_extract_skips_load() {
        let engine = EtlEngine::new(StubPipeline {
            fail_extract: true,
            loaded: AtomicBool::new(false),
        });

        assert!(engine.run().await.is_err());
        assert!(!engine.pipeline().loaded.load(Ordering::SeqCst));
    }
}
