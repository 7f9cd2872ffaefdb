use crate::core::{ConfigProvider, ExportResult, Pipeline, Record, Storage};
use crate::utils::error::{EtlError, Result};
use reqwest::header::{REFERER, USER_AGENT};
use reqwest::Client;
use serde::Serialize;

pub struct MentorPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> MentorPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }

    /// 取出 `data` 陣列；只有缺少 `data` 時視為空清單，其餘形狀錯誤一律中止
    fn records_from_body(body: serde_json::Value) -> Result<Vec<Record>> {
        let mut obj = match body {
            serde_json::Value::Object(obj) => obj,
            other => {
                return Err(EtlError::ResponseShapeError {
                    message: format!("expected a JSON object, got {}", json_kind(&other)),
                })
            }
        };

        let items = match obj.remove("data") {
            None => {
                tracing::warn!("Response has no 'data' field, treating as empty");
                return Ok(Vec::new());
            }
            Some(serde_json::Value::Array(items)) => items,
            Some(other) => {
                return Err(EtlError::ResponseShapeError {
                    message: format!("'data' should be a list, got {}", json_kind(&other)),
                })
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                serde_json::Value::Object(obj) => Ok(Record::from_object(obj)),
                other => Err(EtlError::ResponseShapeError {
                    message: format!(
                        "'data[{}]' should be an object, got {}",
                        index,
                        json_kind(&other)
                    ),
                }),
            })
            .collect()
    }

    /// 4 格縮排，中文原樣輸出
    fn render_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;
        Ok(buf)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MentorPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let endpoint = self.config.api_endpoint();
        let params = self.config.query_params();

        tracing::info!("Requesting API: {}", endpoint);
        tracing::debug!("Query parameters: {:?}", params);

        let response = self
            .client
            .get(&endpoint)
            .query(&params)
            .header(USER_AGENT, self.config.user_agent())
            .header(REFERER, self.config.referer())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let records = Self::records_from_body(body)?;

        tracing::info!("Fetched {} raw records", records.len());
        Ok(records)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<ExportResult> {
        let rules = self.config.mentor_rules();
        Ok(rules.apply(data))
    }

    async fn load(&self, result: ExportResult) -> Result<String> {
        let output_path = self.config.output_path();
        let json = Self::render_json(&result.mentors)?;

        tracing::debug!(
            "Writing {} mentors ({} bytes) to {}",
            result.mentors.len(),
            json.len(),
            output_path
        );
        self.storage.write_file(output_path, &json).await?;

        Ok(self.storage.locate(output_path))
    }
}
