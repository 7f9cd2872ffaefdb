use crate::domain::model::{ExportResult, Mentor, MentorRules, Record};
use url::Url;

pub const UUID_PLACEHOLDER: &str = "{uuid}";

impl MentorRules {
    /// 共建導師 (或其他標記) 出現在 source / position 時排除
    pub fn is_excluded(&self, record: &Record) -> bool {
        record.mentions("source", &self.exclusion_marker)
            || record.mentions("position", &self.exclusion_marker)
    }

    /// Turns a `pic` value into an absolute avatar URL. Empty stays empty.
    pub fn normalize_avatar(&self, pic: &str) -> String {
        if pic.is_empty() {
            return String::new();
        }

        let pic = if self.encode_spaces {
            pic.replace(' ', "%20")
        } else {
            pic.to_string()
        };

        if pic.starts_with("http") {
            return pic;
        }

        // 協定相對網址 (//cdn...) 沿用 avatar_base 的協定
        if pic.starts_with("//") {
            let scheme = Url::parse(&self.avatar_base)
                .map(|u| u.scheme().to_string())
                .unwrap_or_else(|_| "https".to_string());
            return format!("{}:{}", scheme, pic);
        }

        format!(
            "{}/{}",
            self.avatar_base.trim_end_matches('/'),
            pic.strip_prefix('/').unwrap_or(&pic)
        )
    }

    /// `link` wins; otherwise the template filled with `uuid`; otherwise empty.
    pub fn resolve_homepage(&self, link: Option<&str>, uuid: Option<&str>) -> String {
        match (link, uuid) {
            (Some(link), _) if !link.is_empty() => link.to_string(),
            (_, Some(uuid)) if !uuid.is_empty() => {
                self.homepage_template.replace(UUID_PLACEHOLDER, uuid)
            }
            _ => String::new(),
        }
    }

    pub fn to_mentor(&self, record: &Record) -> Option<Mentor> {
        let name = record.text("name").unwrap_or_default().trim().to_string();
        if name.is_empty() {
            return None;
        }

        let avatar = self.normalize_avatar(&record.text("pic").unwrap_or_default());
        let homepage = self.resolve_homepage(
            record.text("link").as_deref(),
            record.truthy_text("uuid").as_deref(),
        );

        Some(Mentor {
            name,
            avatar,
            homepage,
        })
    }

    /// Filters and transforms records, keeping input order.
    pub fn apply(&self, records: Vec<Record>) -> ExportResult {
        let mut result = ExportResult::default();

        for record in records {
            if self.is_excluded(&record) {
                tracing::debug!(
                    "Excluding {:?} (marked {})",
                    record.text("name").unwrap_or_default().trim(),
                    self.exclusion_marker
                );
                result.excluded += 1;
                continue;
            }

            match self.to_mentor(&record) {
                Some(mentor) => result.mentors.push(mentor),
                None => {
                    tracing::warn!("Skipping record without a name: {:?}", record.text("uuid"));
                    result.skipped += 1;
                }
            }
        }

        result
    }
}
