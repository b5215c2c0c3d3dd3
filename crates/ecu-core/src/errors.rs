use ecu_core_types::{format_timestamp, Timestamp};
use thiserror::Error;

/// Result type alias using EcuError
pub type Result<T> = std::result::Result<T, EcuError>;

/// Message carried when the engine explicitly refuses to start
pub const ENGINE_REFUSED_MESSAGE: &str = "Something went wrong";

/// Message carried when an engine start abort was translated
pub const ENGINE_ABORT_MESSAGE: &str = "Handled EngineStartException";

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log assertions and external reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Engine
    VehicleStartFailure,
    EngineStartFailure,

    // Telemetry
    TelemetryRange,

    // Validation
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::VehicleStartFailure => "ERR_VEHICLE_START_FAILURE",
            ExErrorKind::EngineStartFailure => "ERR_ENGINE_START_FAILURE",
            ExErrorKind::TelemetryRange => "ERR_TELEMETRY_RANGE",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the nested
/// cause chain for diagnostics.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Abort raised by an engine controller while starting
///
/// Only ever produced at the controller boundary. `VehicleUnit::start`
/// translates it into `EcuError::VehicleStartFailure`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Engine start aborted: {reason}")]
pub struct EngineStartFailure {
    pub reason: String,
}

impl EngineStartFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Error taxonomy for vehicle operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EcuError {
    /// The engine did not start
    ///
    /// `cause` is set when the controller aborted rather than refused.
    #[error("{message}")]
    VehicleStartFailure {
        message: String,
        #[source]
        cause: Option<EngineStartFailure>,
    },

    /// Requested telemetry predates the vehicle
    #[error("{message}")]
    TelemetryRangeError {
        message: String,
        since_time: Timestamp,
        manufacture_date: Timestamp,
    },

    /// The telemetry store could not answer a query
    #[error("Telemetry store failure: {reason}")]
    TelemetryStoreFailure { reason: String },
}

impl EcuError {
    /// Engine returned `false` from start
    pub fn engine_refused() -> Self {
        EcuError::VehicleStartFailure {
            message: ENGINE_REFUSED_MESSAGE.to_string(),
            cause: None,
        }
    }

    /// Engine aborted its start attempt
    pub fn engine_aborted(cause: EngineStartFailure) -> Self {
        EcuError::VehicleStartFailure {
            message: ENGINE_ABORT_MESSAGE.to_string(),
            cause: Some(cause),
        }
    }

    /// A telemetry request earlier than the manufacture date
    pub fn telemetry_range(since_time: Timestamp, manufacture_date: Timestamp) -> Self {
        EcuError::TelemetryRangeError {
            message: format!(
                "The sinceTime '{}' provided is earlier than the manufacture date '{}' for the vehicle.",
                format_timestamp(&since_time),
                format_timestamp(&manufacture_date),
            ),
            since_time,
            manufacture_date,
        }
    }

    pub fn store_failure(reason: impl Into<String>) -> Self {
        EcuError::TelemetryStoreFailure {
            reason: reason.into(),
        }
    }
}

impl From<EngineStartFailure> for ExError {
    fn from(err: EngineStartFailure) -> Self {
        ExError::new(ExErrorKind::EngineStartFailure)
            .with_op("engine_start")
            .with_message(err.reason)
    }
}

impl From<EcuError> for ExError {
    fn from(err: EcuError) -> Self {
        match err {
            EcuError::VehicleStartFailure { message, cause } => {
                let ex = ExError::new(ExErrorKind::VehicleStartFailure)
                    .with_op("vehicle_start")
                    .with_message(message);
                match cause {
                    Some(cause) => ex.with_source(cause.into()),
                    None => ex,
                }
            }

            EcuError::TelemetryRangeError { message, .. } => {
                ExError::new(ExErrorKind::TelemetryRange)
                    .with_op("get_sensor_data")
                    .with_message(message)
            }

            EcuError::TelemetryStoreFailure { reason } => ExError::new(ExErrorKind::Persistence)
                .with_op("telemetry_query")
                .with_message(reason),
        }
    }
}
