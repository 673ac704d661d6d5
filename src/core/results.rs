//! Typed outcomes for machine lifecycle operations.
//!
//! Failure constructors format `"<description>: <error>"` exactly once and
//! hand that same string to both the [`ErrorSink`] and the returned record, so
//! what the user sees always matches what was logged.

use serde::Serialize;
use thiserror::Error;

/// Boxed error produced by an external lifecycle collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Destination for failure messages.
pub trait ErrorSink {
    fn error(&mut self, message: &str);
}

impl ErrorSink for () {
    fn error(&mut self, _message: &str) {}
}

/// Forwards failures to the `log` facade at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn error(&mut self, message: &str) {
        log::error!("{message}");
    }
}

/// Collaborator error decorated with a human description.
///
/// `Display` yields the decorated message; `source()` yields the original
/// error unchanged.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct OperationError {
    message: String,
    #[source]
    source: BoxError,
}

impl OperationError {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_source(self) -> BoxError {
        self.source
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StartResult {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StopResult {
    pub name: String,
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PowerOffResult {
    pub name: String,
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    pub name: String,
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IpResult {
    pub name: String,
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterStatusResult {
    pub name: String,
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsoleResult {
    pub success: bool,
    pub error: String,
}

/// Any lifecycle outcome, tagged with its operation kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationResult {
    Start(StartResult),
    Stop(StopResult),
    PowerOff(PowerOffResult),
    Delete(DeleteResult),
    Ip(IpResult),
    ClusterStatus(ClusterStatusResult),
    Console(ConsoleResult),
}

impl OperationResult {
    /// Machine name; consoles are not tied to a single machine.
    pub fn name(&self) -> Option<&str> {
        match self {
            OperationResult::Start(result) => Some(&result.name),
            OperationResult::Stop(result) => Some(&result.name),
            OperationResult::PowerOff(result) => Some(&result.name),
            OperationResult::Delete(result) => Some(&result.name),
            OperationResult::Ip(result) => Some(&result.name),
            OperationResult::ClusterStatus(result) => Some(&result.name),
            OperationResult::Console(_) => None,
        }
    }

    pub fn error(&self) -> &str {
        match self {
            OperationResult::Start(result) => &result.error,
            OperationResult::Stop(result) => &result.error,
            OperationResult::PowerOff(result) => &result.error,
            OperationResult::Delete(result) => &result.error,
            OperationResult::Ip(result) => &result.error,
            OperationResult::ClusterStatus(result) => &result.error,
            OperationResult::Console(result) => &result.error,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error().is_empty()
    }
}

macro_rules! impl_from_result {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for OperationResult {
                fn from(result: $ty) -> Self {
                    OperationResult::$variant(result)
                }
            }
        )*
    };
}

impl_from_result!(
    Start(StartResult),
    Stop(StopResult),
    PowerOff(PowerOffResult),
    Delete(DeleteResult),
    Ip(IpResult),
    ClusterStatus(ClusterStatusResult),
    Console(ConsoleResult),
);

/// Builds failure records for lifecycle operations.
#[derive(Debug, Default)]
pub struct ResultReporter<S = LogSink> {
    sink: S,
}

impl<S: ErrorSink> ResultReporter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn start_error(
        &mut self,
        name: &str,
        description: &str,
        err: impl Into<BoxError>,
    ) -> (StartResult, OperationError) {
        let full = self.log_error(description, err.into());
        let result = StartResult {
            name: name.to_string(),
            error: full.message.clone(),
        };
        (result, full)
    }

    pub fn stop_error(
        &mut self,
        name: &str,
        description: &str,
        err: impl Into<BoxError>,
    ) -> (StopResult, OperationError) {
        let full = self.log_error(description, err.into());
        let result = StopResult {
            name: name.to_string(),
            success: false,
            error: full.message.clone(),
        };
        (result, full)
    }

    pub fn power_off_error(
        &mut self,
        name: &str,
        description: &str,
        err: impl Into<BoxError>,
    ) -> (PowerOffResult, OperationError) {
        let full = self.log_error(description, err.into());
        let result = PowerOffResult {
            name: name.to_string(),
            success: false,
            error: full.message.clone(),
        };
        (result, full)
    }

    pub fn delete_error(
        &mut self,
        name: &str,
        description: &str,
        err: impl Into<BoxError>,
    ) -> (DeleteResult, OperationError) {
        let full = self.log_error(description, err.into());
        let result = DeleteResult {
            name: name.to_string(),
            success: false,
            error: full.message.clone(),
        };
        (result, full)
    }

    pub fn ip_error(
        &mut self,
        name: &str,
        description: &str,
        err: impl Into<BoxError>,
    ) -> (IpResult, OperationError) {
        let full = self.log_error(description, err.into());
        let result = IpResult {
            name: name.to_string(),
            success: false,
            error: full.message.clone(),
        };
        (result, full)
    }

    pub fn status_error(
        &mut self,
        name: &str,
        description: &str,
        err: impl Into<BoxError>,
    ) -> (ClusterStatusResult, OperationError) {
        let full = self.log_error(description, err.into());
        let result = ClusterStatusResult {
            name: name.to_string(),
            success: false,
            error: full.message.clone(),
        };
        (result, full)
    }

    pub fn console_url_error(
        &mut self,
        description: &str,
        err: impl Into<BoxError>,
    ) -> (ConsoleResult, OperationError) {
        let full = self.log_error(description, err.into());
        let result = ConsoleResult {
            success: false,
            error: full.message.clone(),
        };
        (result, full)
    }

    fn log_error(&mut self, description: &str, source: BoxError) -> OperationError {
        let message = format!("{description}: {source}");
        self.sink.error(&message);
        OperationError { message, source }
    }
}
