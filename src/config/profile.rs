use crate::core::transform::UUID_PLACEHOLDER;
use crate::domain::model::MentorRules;
use serde::{Deserialize, Serialize};

/// URL rules for avatars and homepages. The site has served both layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum SiteProfile {
    /// Avatars under `/adminapi` with `%20` for spaces, homepages under `/teacher/`.
    #[default]
    AdminApi,
    /// Avatars under the site root as-is, homepages under `/faculty/`.
    Public,
}

impl SiteProfile {
    pub fn avatar_base(&self, site_base: &str) -> String {
        let site_base = site_base.trim_end_matches('/');
        match self {
            SiteProfile::AdminApi => format!("{}/adminapi", site_base),
            SiteProfile::Public => site_base.to_string(),
        }
    }

    pub fn encode_spaces(&self) -> bool {
        matches!(self, SiteProfile::AdminApi)
    }

    pub fn homepage_template(&self, site_base: &str) -> String {
        let site_base = site_base.trim_end_matches('/');
        let section = match self {
            SiteProfile::AdminApi => "teacher",
            SiteProfile::Public => "faculty",
        };
        format!("{}/{}/{}", site_base, section, UUID_PLACEHOLDER)
    }

    pub fn rules(&self, site_base: &str, exclusion_marker: &str) -> MentorRules {
        MentorRules {
            exclusion_marker: exclusion_marker.to_string(),
            avatar_base: self.avatar_base(site_base),
            encode_spaces: self.encode_spaces(),
            homepage_template: self.homepage_template(site_base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_api_profile() {
        let rules = SiteProfile::AdminApi.rules("https://www.bjzgca.edu.cn/", "共建导师");
        assert_eq!(rules.avatar_base, "https://www.bjzgca.edu.cn/adminapi");
        assert!(rules.encode_spaces);
        assert_eq!(
            rules.homepage_template,
            "https://www.bjzgca.edu.cn/teacher/{uuid}"
        );
    }

    #[test]
    fn test_public_profile() {
        let rules = SiteProfile::Public.rules("https://www.bjzgca.edu.cn", "共建导师");
        assert_eq!(rules.avatar_base, "https://www.bjzgca.edu.cn");
        assert!(!rules.encode_spaces);
        assert_eq!(
            rules.homepage_template,
            "https://www.bjzgca.edu.cn/faculty/{uuid}"
        );
    }

    #[test]
    fn test_profile_names_in_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            profile: SiteProfile,
        }
        let parsed: Wrapper = toml::from_str(r#"profile = "public""#).unwrap();
        assert_eq!(parsed.profile, SiteProfile::Public);
        let parsed: Wrapper = toml::from_str(r#"profile = "admin-api""#).unwrap();
        assert_eq!(parsed.profile, SiteProfile::AdminApi);
    }
}
