//! Lifecycle facade over an external machine driver.
//!
//! The driver does the actual work; this layer only turns its outcome into a
//! typed record and routes failures through the [`ResultReporter`].

use std::net::IpAddr;

use super::results::{
    BoxError, ClusterStatusResult, ConsoleResult, DeleteResult, ErrorSink, IpResult, LogSink,
    OperationError, PowerOffResult, ResultReporter, StartResult, StopResult,
};

pub const START_FAILED: &str = "Cannot start machine";
pub const STOP_FAILED: &str = "Cannot stop machine";
pub const POWER_OFF_FAILED: &str = "Cannot power off machine";
pub const DELETE_FAILED: &str = "Cannot delete machine";
pub const IP_FAILED: &str = "Cannot get IP";
pub const STATUS_FAILED: &str = "Cannot get cluster status";
pub const CONSOLE_FAILED: &str = "Cannot get console URL";

/// Operations implemented by a hypervisor backend.
pub trait MachineDriver {
    /// Cluster state as reported by the backend (e.g. `Running`).
    type Status;

    fn start(&mut self, name: &str) -> Result<(), BoxError>;
    fn stop(&mut self, name: &str) -> Result<(), BoxError>;
    fn power_off(&mut self, name: &str) -> Result<(), BoxError>;
    fn delete(&mut self, name: &str) -> Result<(), BoxError>;
    fn ip(&mut self, name: &str) -> Result<IpAddr, BoxError>;
    fn status(&mut self, name: &str) -> Result<Self::Status, BoxError>;
    fn console_url(&mut self) -> Result<String, BoxError>;
}

/// Record plus the driver value on success, or the reported failure.
pub type Outcome<R, T> = (R, Result<T, OperationError>);

pub struct Machine<D, S = LogSink> {
    name: String,
    driver: D,
    reporter: ResultReporter<S>,
}

impl<D: MachineDriver, S: ErrorSink> Machine<D, S> {
    pub fn new(name: impl Into<String>, driver: D, sink: S) -> Self {
        Self {
            name: name.into(),
            driver,
            reporter: ResultReporter::new(sink),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reporter(&self) -> &ResultReporter<S> {
        &self.reporter
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn start(&mut self) -> Outcome<StartResult, ()> {
        match self.driver.start(&self.name) {
            Ok(()) => (
                StartResult {
                    name: self.name.clone(),
                    error: String::new(),
                },
                Ok(()),
            ),
            Err(err) => {
                let (result, err) = self.reporter.start_error(&self.name, START_FAILED, err);
                (result, Err(err))
            }
        }
    }

    pub fn stop(&mut self) -> Outcome<StopResult, ()> {
        match self.driver.stop(&self.name) {
            Ok(()) => (
                StopResult {
                    name: self.name.clone(),
                    success: true,
                    error: String::new(),
                },
                Ok(()),
            ),
            Err(err) => {
                let (result, err) = self.reporter.stop_error(&self.name, STOP_FAILED, err);
                (result, Err(err))
            }
        }
    }

    pub fn power_off(&mut self) -> Outcome<PowerOffResult, ()> {
        match self.driver.power_off(&self.name) {
            Ok(()) => (
                PowerOffResult {
                    name: self.name.clone(),
                    success: true,
                    error: String::new(),
                },
                Ok(()),
            ),
            Err(err) => {
                let (result, err) =
                    self.reporter
                        .power_off_error(&self.name, POWER_OFF_FAILED, err);
                (result, Err(err))
            }
        }
    }

    pub fn delete(&mut self) -> Outcome<DeleteResult, ()> {
        match self.driver.delete(&self.name) {
            Ok(()) => (
                DeleteResult {
                    name: self.name.clone(),
                    success: true,
                    error: String::new(),
                },
                Ok(()),
            ),
            Err(err) => {
                let (result, err) = self.reporter.delete_error(&self.name, DELETE_FAILED, err);
                (result, Err(err))
            }
        }
    }

    pub fn ip(&mut self) -> Outcome<IpResult, IpAddr> {
        match self.driver.ip(&self.name) {
            Ok(ip) => (
                IpResult {
                    name: self.name.clone(),
                    success: true,
                    error: String::new(),
                },
                Ok(ip),
            ),
            Err(err) => {
                let (result, err) = self.reporter.ip_error(&self.name, IP_FAILED, err);
                (result, Err(err))
            }
        }
    }

    pub fn status(&mut self) -> Outcome<ClusterStatusResult, D::Status> {
        match self.driver.status(&self.name) {
            Ok(status) => (
                ClusterStatusResult {
                    name: self.name.clone(),
                    success: true,
                    error: String::new(),
                },
                Ok(status),
            ),
            Err(err) => {
                let (result, err) = self.reporter.status_error(&self.name, STATUS_FAILED, err);
                (result, Err(err))
            }
        }
    }

    pub fn console_url(&mut self) -> Outcome<ConsoleResult, String> {
        match self.driver.console_url() {
            Ok(url) => (
                ConsoleResult {
                    success: true,
                    error: String::new(),
                },
                Ok(url),
            ),
            Err(err) => {
                let (result, err) = self.reporter.console_url_error(CONSOLE_FAILED, err);
                (result, Err(err))
            }
        }
    }
}
