pub mod cli;
pub mod profile;
pub mod toml_config;

pub use profile::SiteProfile;

use crate::core::transform::UUID_PLACEHOLDER;
use crate::core::{ConfigProvider, MentorRules};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://www.bjzgca.edu.cn";
pub const DEFAULT_API_PATH: &str = "/api/teacher";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";
pub const DEFAULT_EXCLUSION_MARKER: &str = "共建导师";
pub const DEFAULT_OUTPUT_PATH: &str = "data/mentors.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_LIMIT: usize = 300;
pub const MAX_TIMEOUT_SECS: u64 = 300;

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// 網站固定的查詢參數；一次抓完所以 page 固定為 1
pub fn default_query(limit: usize) -> Vec<(String, String)> {
    vec![
        ("type".to_string(), "tutor".to_string()),
        ("page".to_string(), "1".to_string()),
        ("limit".to_string(), limit.to_string()),
        ("orderBy".to_string(), "sort1".to_string()),
    ]
}

/// Checks shared by every config source.
pub(crate) fn validate_common<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_url("api_endpoint", &config.api_endpoint())?;
    validation::validate_url("referer", &config.referer())?;
    validation::validate_path("output_path", config.output_path())?;
    validation::validate_range(
        "timeout",
        config.timeout().as_secs(),
        1,
        MAX_TIMEOUT_SECS,
    )?;

    let rules = config.mentor_rules();
    validation::validate_non_empty_string("exclusion_marker", &rules.exclusion_marker)?;
    validation::validate_url("avatar_base", &rules.avatar_base)?;
    validation::validate_template("homepage_template", &rules.homepage_template, UUID_PLACEHOLDER)?;
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, clap::Parser)]
#[command(name = "mentor-export")]
#[command(about = "Export the faculty mentor list to a JSON file")]
pub struct CliConfig {
    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[arg(short, long = "output", default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, value_enum, default_value_t = SiteProfile::AdminApi)]
    pub profile: SiteProfile,

    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, help = "Request timeout in seconds")]
    pub timeout: u64,

    #[arg(long, default_value = DEFAULT_EXCLUSION_MARKER)]
    pub exclude: String,

    #[arg(long, help = "Override the profile's avatar base URL")]
    pub avatar_base: Option<String>,

    #[arg(long, help = "Override the profile's homepage template ({uuid} is substituted)")]
    pub homepage_template: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> String {
        join_url(&self.api_base, DEFAULT_API_PATH)
    }

    fn query_params(&self) -> Vec<(String, String)> {
        default_query(self.limit)
    }

    fn user_agent(&self) -> &str {
        DEFAULT_USER_AGENT
    }

    fn referer(&self) -> String {
        join_url(&self.api_base, "/faculty")
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn mentor_rules(&self) -> MentorRules {
        let mut rules = self.profile.rules(&self.api_base, &self.exclude);
        if let Some(base) = &self.avatar_base {
            rules.avatar_base = base.clone();
        }
        if let Some(template) = &self.homepage_template {
            rules.homepage_template = template.clone();
        }
        rules
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base", &self.api_base)?;
        validation::validate_positive_number("limit", self.limit, 1)?;
        validate_common(self)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_match_site_constants() {
        let config = CliConfig::try_parse_from(["mentor-export"]).unwrap();

        assert_eq!(config.api_endpoint(), "https://www.bjzgca.edu.cn/api/teacher");
        assert_eq!(config.referer(), "https://www.bjzgca.edu.cn/faculty");
        assert_eq!(config.output_path(), "data/mentors.json");
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.profile, SiteProfile::AdminApi);
        assert!(config.config.is_none());
        assert!(config.validate().is_ok());

        let params = config.query_params();
        assert!(params.contains(&("limit".to_string(), "300".to_string())));
        assert!(params.contains(&("orderBy".to_string(), "sort1".to_string())));
        assert_eq!(config.mentor_rules().exclusion_marker, "共建导师");
    }

    #[test]
    fn test_public_profile_flag() {
        let config = CliConfig::try_parse_from(["mentor-export", "--profile", "public"]).unwrap();
        let rules = config.mentor_rules();
        assert_eq!(rules.avatar_base, "https://www.bjzgca.edu.cn");
        assert!(!rules.encode_spaces);
        assert!(rules.homepage_template.ends_with("/faculty/{uuid}"));
    }

    #[test]
    fn test_overrides_win_over_profile() {
        let config = CliConfig::try_parse_from([
            "mentor-export",
            "--avatar-base",
            "https://img.example.com",
            "--homepage-template",
            "https://example.com/people/{uuid}",
        ])
        .unwrap();

        let rules = config.mentor_rules();
        assert_eq!(rules.avatar_base, "https://img.example.com");
        assert_eq!(rules.homepage_template, "https://example.com/people/{uuid}");
        assert!(rules.encode_spaces);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let no_placeholder = CliConfig::try_parse_from([
            "mentor-export",
            "--homepage-template",
            "https://example.com/people/",
        ])
        .unwrap();
        assert!(no_placeholder.validate().is_err());

        let zero_timeout =
            CliConfig::try_parse_from(["mentor-export", "--timeout", "0"]).unwrap();
        assert!(zero_timeout.validate().is_err());

        let bad_base = CliConfig::try_parse_from(["mentor-export", "--api-base", "ftp://x"]).unwrap();
        assert!(bad_base.validate().is_err());

        let blank_marker = CliConfig::try_parse_from(["mentor-export", "--exclude", " "]).unwrap();
        assert!(blank_marker.validate().is_err());
    }
}
