use crate::domain::model::{ExportResult, MentorRules, Record};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Where `path` ends up once written, as shown to the user.
    fn locate(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> String;
    fn query_params(&self) -> Vec<(String, String)>;
    fn user_agent(&self) -> &str;
    fn referer(&self) -> String;
    fn timeout(&self) -> Duration;
    fn output_path(&self) -> &str;
    fn mentor_rules(&self) -> MentorRules;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, data: Vec<Record>) -> Result<ExportResult>;
    async fn load(&self, result: ExportResult) -> Result<String>;
}
