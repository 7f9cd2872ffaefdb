pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, SiteProfile};
pub use core::{etl::EtlEngine, pipeline::MentorPipeline};
pub use domain::model::{ExportSummary, Mentor, MentorRules};
pub use utils::error::{EtlError, Result};
