use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unexpected API response: {message}")]
    ResponseShapeError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => ErrorCategory::Network,
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::SerializationError(_) | EtlError::ResponseShapeError { .. } => {
                ErrorCategory::Data
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路問題通常重跑即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(e) if e.is_timeout() => {
                "The site did not answer in time; retry later or raise --timeout"
            }
            EtlError::ApiError(e) if e.is_decode() => {
                "The API answered with something that is not JSON; check --api-base"
            }
            EtlError::ApiError(_) => "Check your network connection and the API base URL",
            EtlError::HttpStatusError { status, .. } if *status == 403 || *status == 429 => {
                "The site is refusing requests; wait a while before retrying"
            }
            EtlError::HttpStatusError { .. } => {
                "The API endpoint may have moved; verify the URL in a browser"
            }
            EtlError::IoError(_) => {
                "Make sure the output directory is writable and the disk is not full"
            }
            EtlError::ResponseShapeError { .. } => {
                "The API changed its response format; inspect it with --verbose"
            }
            EtlError::SerializationError(_) => "The fetched data could not be encoded as JSON",
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again (see --help)"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ApiError(e) => format!("請求失敗: {}", e),
            EtlError::HttpStatusError { status, url } => {
                format!("請求失敗: HTTP {} ({})", status, url)
            }
            EtlError::IoError(e) => format!("無法寫入輸出檔案: {}", e),
            EtlError::ResponseShapeError { message } => format!("請求失敗: {}", message),
            other => other.to_string(),
        }
    }

    /// 失敗時印到 stderr 的兩行訊息
    pub fn report(&self) -> String {
        format!(
            "❌ {}\n💡 建議: {}",
            self.user_friendly_message(),
            self.recovery_suggestion()
        )
    }

    /// 結束碼：依嚴重程度決定
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
