use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Remote command '{command}' returned HTTP {status}: {body}")]
    RemoteError {
        command: String,
        status: u16,
        body: String,
    },

    #[error("Unexpected export status response: '{body}'")]
    StatusParseError { body: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Required file does not exist: {path}")]
    MissingFileError { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Data,
    FileSystem,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ExportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExportError::ApiError(_) => ErrorCategory::Network,
            ExportError::RemoteError { .. } | ExportError::StatusParseError { .. } => {
                ErrorCategory::Remote
            }
            ExportError::CsvError(_) | ExportError::SerializationError(_) => ErrorCategory::Data,
            ExportError::IoError(_) | ExportError::MissingFileError { .. } => {
                ErrorCategory::FileSystem
            }
            ExportError::ConfigError { .. }
            | ExportError::ConfigValidationError { .. }
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 嚴重程度決定 CLI 的退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::FileSystem => match self {
                ExportError::MissingFileError { .. } => ErrorSeverity::High,
                _ => ErrorSeverity::Critical,
            },
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ExportError::ApiError(_) => {
                "Make sure MxManagementCenter is open and remote control is enabled".to_string()
            }
            ExportError::RemoteError { command, .. } => format!(
                "Check the '{}' command arguments against https://localhost:<port>/help",
                command
            ),
            ExportError::StatusParseError { .. } => {
                "The export status endpoint should answer 0 or 1; check the MxMC version"
                    .to_string()
            }
            ExportError::CsvError(_) => {
                "Check that the CSV file has a header row and consistent columns".to_string()
            }
            ExportError::IoError(_) => "Check file permissions and free disk space".to_string(),
            ExportError::SerializationError(_) => {
                "Check that the JSON file is valid (a single object)".to_string()
            }
            ExportError::MissingFileError { path } => {
                format!("Create '{}' or point the tool at the right location", path)
            }
            ExportError::ConfigError { .. } | ExportError::ConfigValidationError { .. } => {
                "Check the settings file for typos".to_string()
            }
            ExportError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value given for '{}'", field)
            }
            ExportError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach MxManagementCenter: {}", self),
            ErrorCategory::Remote => format!("MxManagementCenter rejected a command: {}", self),
            ErrorCategory::Data => format!("Input data could not be processed: {}", self),
            ErrorCategory::FileSystem => format!("File problem: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
