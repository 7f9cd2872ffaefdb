use crate::config::{
    default_query, join_url, validate_common, SiteProfile, DEFAULT_API_PATH,
    DEFAULT_EXCLUSION_MARKER, DEFAULT_LIMIT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::core::{ConfigProvider, MentorRules};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub filter: Option<FilterConfig>,
    pub transform: Option<TransformConfig>,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub path: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub parameters: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub exclude_marker: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    pub profile: Option<SiteProfile>,
    pub avatar_base: Option<String>,
    pub homepage_template: Option<String>,
    pub encode_spaces: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SITE_BASE})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    fn transform_section(&self) -> TransformConfig {
        self.transform.clone().unwrap_or_default()
    }

    pub fn profile(&self) -> SiteProfile {
        self.transform_section().profile.unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> String {
        let path = self.source.path.as_deref().unwrap_or(DEFAULT_API_PATH);
        join_url(&self.source.base_url, path)
    }

    fn query_params(&self) -> Vec<(String, String)> {
        match &self.source.parameters {
            Some(params) => params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => default_query(DEFAULT_LIMIT),
        }
    }

    fn user_agent(&self) -> &str {
        self.source.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    fn referer(&self) -> String {
        self.source
            .referer
            .clone()
            .unwrap_or_else(|| join_url(&self.source.base_url, "/faculty"))
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn mentor_rules(&self) -> MentorRules {
        let marker = self
            .filter
            .as_ref()
            .and_then(|f| f.exclude_marker.as_deref())
            .unwrap_or(DEFAULT_EXCLUSION_MARKER);

        let transform = self.transform_section();
        let mut rules = self.profile().rules(&self.source.base_url, marker);
        if let Some(base) = transform.avatar_base {
            rules.avatar_base = base;
        }
        if let Some(template) = transform.homepage_template {
            rules.homepage_template = template;
        }
        if let Some(encode) = transform.encode_spaces {
            rules.encode_spaces = encode;
        }
        rules
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_url("source.base_url", &self.source.base_url)?;
        validate_common(self)
    }
}
