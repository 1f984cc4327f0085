//! Error taxonomy for zaia
//!
//! Every failure carries exactly one [`ErrorCode`], and every code maps to exactly one
//! process exit code.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

/// Exit code for a successful invocation
pub const EXIT_OK: i32 = 0;

/// Closed set of error codes surfaced in the error envelope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // auth
    AuthRequired,
    AuthInvalidToken,
    AuthTokenExpired,
    AuthApiError,
    TokenNoProject,
    TokenMultiProject,

    // validation / usage
    ServiceRequired,
    ConfirmRequired,
    FileNotFound,
    InvalidImportYml,
    ImportHasProject,
    InvalidScaling,
    InvalidParameter,
    InvalidEnvFormat,
    InvalidHostname,
    InvalidUsage,
    UnknownType,

    // not found
    ServiceNotFound,
    ProcessNotFound,
    ProcessAlreadyTerminal,

    PermissionDenied,
    NetworkError,

    // local setup
    SetupDownloadFailed,
    SetupInstallFailed,
    SetupConfigFailed,
    SetupUnsupportedOs,

    // generic / platform
    ApiError,
    ApiTimeout,
    ApiRateLimited,

    /// A code outside the table; always exits 1
    Other(String),
}

const KNOWN_CODES: &[ErrorCode] = &[
    ErrorCode::AuthRequired,
    ErrorCode::AuthInvalidToken,
    ErrorCode::AuthTokenExpired,
    ErrorCode::AuthApiError,
    ErrorCode::TokenNoProject,
    ErrorCode::TokenMultiProject,
    ErrorCode::ServiceRequired,
    ErrorCode::ConfirmRequired,
    ErrorCode::FileNotFound,
    ErrorCode::InvalidImportYml,
    ErrorCode::ImportHasProject,
    ErrorCode::InvalidScaling,
    ErrorCode::InvalidParameter,
    ErrorCode::InvalidEnvFormat,
    ErrorCode::InvalidHostname,
    ErrorCode::InvalidUsage,
    ErrorCode::UnknownType,
    ErrorCode::ServiceNotFound,
    ErrorCode::ProcessNotFound,
    ErrorCode::ProcessAlreadyTerminal,
    ErrorCode::PermissionDenied,
    ErrorCode::NetworkError,
    ErrorCode::SetupDownloadFailed,
    ErrorCode::SetupInstallFailed,
    ErrorCode::SetupConfigFailed,
    ErrorCode::SetupUnsupportedOs,
    ErrorCode::ApiError,
    ErrorCode::ApiTimeout,
    ErrorCode::ApiRateLimited,
];

impl ErrorCode {
    /// Wire spelling of the code
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::AuthRequired => "AUTH_REQUIRED",
            ErrorCode::AuthInvalidToken => "AUTH_INVALID_TOKEN",
            ErrorCode::AuthTokenExpired => "AUTH_TOKEN_EXPIRED",
            ErrorCode::AuthApiError => "AUTH_API_ERROR",
            ErrorCode::TokenNoProject => "TOKEN_NO_PROJECT",
            ErrorCode::TokenMultiProject => "TOKEN_MULTI_PROJECT",
            ErrorCode::ServiceRequired => "SERVICE_REQUIRED",
            ErrorCode::ConfirmRequired => "CONFIRM_REQUIRED",
            ErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ErrorCode::InvalidImportYml => "INVALID_IMPORT_YML",
            ErrorCode::ImportHasProject => "IMPORT_HAS_PROJECT",
            ErrorCode::InvalidScaling => "INVALID_SCALING",
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
            ErrorCode::InvalidEnvFormat => "INVALID_ENV_FORMAT",
            ErrorCode::InvalidHostname => "INVALID_HOSTNAME",
            ErrorCode::InvalidUsage => "INVALID_USAGE",
            ErrorCode::UnknownType => "UNKNOWN_TYPE",
            ErrorCode::ServiceNotFound => "SERVICE_NOT_FOUND",
            ErrorCode::ProcessNotFound => "PROCESS_NOT_FOUND",
            ErrorCode::ProcessAlreadyTerminal => "PROCESS_ALREADY_TERMINAL",
            ErrorCode::PermissionDenied => "PERMISSION_DENIED",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::SetupDownloadFailed => "SETUP_DOWNLOAD_FAILED",
            ErrorCode::SetupInstallFailed => "SETUP_INSTALL_FAILED",
            ErrorCode::SetupConfigFailed => "SETUP_CONFIG_FAILED",
            ErrorCode::SetupUnsupportedOs => "SETUP_UNSUPPORTED_OS",
            ErrorCode::ApiError => "API_ERROR",
            ErrorCode::ApiTimeout => "API_TIMEOUT",
            ErrorCode::ApiRateLimited => "API_RATE_LIMITED",
            ErrorCode::Other(code) => code,
        }
    }

    /// Process exit code for this error code
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCode::AuthRequired
            | ErrorCode::AuthInvalidToken
            | ErrorCode::AuthTokenExpired
            | ErrorCode::AuthApiError
            | ErrorCode::TokenNoProject
            | ErrorCode::TokenMultiProject => 2,

            ErrorCode::ServiceRequired
            | ErrorCode::ConfirmRequired
            | ErrorCode::FileNotFound
            | ErrorCode::InvalidImportYml
            | ErrorCode::ImportHasProject
            | ErrorCode::InvalidScaling
            | ErrorCode::InvalidParameter
            | ErrorCode::InvalidEnvFormat
            | ErrorCode::InvalidHostname
            | ErrorCode::InvalidUsage
            | ErrorCode::UnknownType => 3,

            ErrorCode::ServiceNotFound
            | ErrorCode::ProcessNotFound
            | ErrorCode::ProcessAlreadyTerminal => 4,

            ErrorCode::PermissionDenied => 5,

            ErrorCode::NetworkError => 6,

            ErrorCode::SetupDownloadFailed
            | ErrorCode::SetupInstallFailed
            | ErrorCode::SetupConfigFailed
            | ErrorCode::SetupUnsupportedOs => 7,

            ErrorCode::ApiError
            | ErrorCode::ApiTimeout
            | ErrorCode::ApiRateLimited
            | ErrorCode::Other(_) => 1,
        }
    }
}

impl FromStr for ErrorCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let known = KNOWN_CODES.iter().find(|code| code.as_str() == s);
        Ok(known.cloned().unwrap_or_else(|| ErrorCode::Other(s.to_string())))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exit code for a wire-level code string
pub fn exit_code_for(code: &str) -> i32 {
    match code.parse::<ErrorCode>() {
        Ok(code) => code.exit_code(),
        Err(never) => match never {},
    }
}

/// Main error type for zaia
#[derive(Error, Debug, Clone)]
#[error("{code}: {message}")]
pub struct CliError {
    /// Taxonomy code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,

    /// Suggested remediation
    pub suggestion: Option<String>,

    /// Structured detail for the caller
    pub context: Option<Value>,

    /// Machine-readable code reported by the platform, if any
    pub platform_code: Option<String>,
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestion: None,
            context: None,
            platform_code: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_platform_code(mut self, platform_code: impl Into<String>) -> Self {
        self.platform_code = Some(platform_code.into());
        self
    }

    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }

    /// Shorthand for the generic platform failure
    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiError, message)
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParameter, message)
    }

    pub fn service_required() -> Self {
        Self::new(ErrorCode::ServiceRequired, "Service hostname is required")
            .with_suggestion("Use --service <hostname>")
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::api(format!("IO error: {err}"))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::api(format!("JSON error: {err}"))
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::new(ErrorCode::InvalidImportYml, format!("YAML error: {err}"))
    }
}
