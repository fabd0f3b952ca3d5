use thiserror::Error;

#[derive(Error, Debug)]
pub enum AicError {
    #[error("Failed to initialise AIC: {0}")]
    InitializationError(String),

    #[error("Invalid pipeline configuration: {0}")]
    ConfigurationError(String),

    #[error("Invalid {0} dimensions: width={1}, height={2}")]
    InvalidDimensions(String, u32, u32),

    #[error("Failed to compute ISP configuration: {0}")]
    EncodeError(String),

    #[error("Malformed AIC config: missing {0} block")]
    MissingBlock(&'static str),

    #[error("Parameter buffer layout mismatch: {0}")]
    LayoutError(String),

    #[error("AIC has not been configured")]
    NotConfigured,

    #[error("ISP pipe is already bound to an active AIC instance")]
    PipeBusy,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Coarse classification of [`AicError`], used by callers to decide
/// whether to abort the pipeline or only drop the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Calibration rejected; no pipeline can be built.
    Initialization,
    /// Geometry rejected; `run` must not be attempted until reconfigured.
    Configuration,
    /// Frame-local failure; the pipeline stays configured.
    Encoding,
    /// API called out of order or resource contention.
    Usage,
    Io,
}

impl AicError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AicError::InitializationError(_) => ErrorKind::Initialization,
            AicError::ConfigurationError(_) | AicError::InvalidDimensions(..) => {
                ErrorKind::Configuration
            }
            AicError::EncodeError(_) | AicError::MissingBlock(_) | AicError::LayoutError(_) => {
                ErrorKind::Encoding
            }
            AicError::NotConfigured | AicError::PipeBusy => ErrorKind::Usage,
            AicError::IoError(_) => ErrorKind::Io,
        }
    }

    /// Frame-local errors leave the pipeline usable for the next frame.
    pub fn is_frame_local(&self) -> bool {
        self.kind() == ErrorKind::Encoding
    }
}

pub type Result<T> = std::result::Result<T, AicError>;
