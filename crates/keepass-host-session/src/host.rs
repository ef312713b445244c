use std::any::Any;
use std::io::{Read, Write};
use std::panic::{self, AssertUnwindSafe};

use keepass_host_frame::{FrameConfig, FrameError, FrameReader, FrameWriter};
use serde_json::Value;

use crate::envelope::{Request, Response};
use crate::error::{HostError, Result};
use crate::router;
use crate::session::Session;
use crate::shutdown::Shutdown;

const RESPONSE_TOO_LARGE: &str = "response exceeds maximum message size";

/// Why the session loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The browser closed the input stream on a frame boundary.
    EndOfStream,
    /// An inbound frame was malformed; the stream cannot be realigned.
    DecodeFailure,
    /// A shutdown was requested.
    Interrupted,
}

/// Session loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Running,
    Stopped(StopReason),
}

/// Counters reported when the loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub requests: u64,
    pub failures: u64,
    pub stop_reason: StopReason,
}

/// The request/response loop.
///
/// Reads one frame, answers it, and only then reads the next. Each request
/// gets exactly one response unless the loop stops first.
pub struct Host<R, W> {
    reader: FrameReader<R>,
    writer: FrameWriter<W>,
    session: Session,
    shutdown: Shutdown,
    state: HostState,
    requests: u64,
    failures: u64,
}

impl<R: Read, W: Write> Host<R, W> {
    /// Create a host with default frame limits.
    pub fn new(input: R, output: W, session: Session) -> Self {
        Self::with_config(input, output, session, FrameConfig::default())
    }

    /// Create a host with explicit frame limits.
    pub fn with_config(input: R, output: W, session: Session, config: FrameConfig) -> Self {
        Self {
            reader: FrameReader::with_config(input, config.clone()),
            writer: FrameWriter::with_config(output, config),
            session,
            shutdown: Shutdown::new(),
            state: HostState::Running,
            requests: 0,
            failures: 0,
        }
    }

    /// Use `shutdown` as this loop's stop signal.
    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// A handle that stops this loop when requested.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consume the host and return its streams.
    pub fn into_inner(self) -> (R, W) {
        (self.reader.into_inner(), self.writer.into_inner())
    }

    /// Run until the input ends, a frame is malformed, or shutdown is
    /// requested.
    ///
    /// Returns `Err` only for stream I/O failures.
    pub fn run(&mut self) -> Result<SessionSummary> {
        tracing::info!(caller = self.session.caller(), "session started");
        loop {
            if let HostState::Stopped(stop_reason) = self.step()? {
                let summary = SessionSummary {
                    requests: self.requests,
                    failures: self.failures,
                    stop_reason,
                };
                tracing::info!(
                    requests = summary.requests,
                    failures = summary.failures,
                    reason = ?summary.stop_reason,
                    "session stopped"
                );
                return Ok(summary);
            }
        }
    }

    /// Serve at most one request.
    pub fn step(&mut self) -> Result<HostState> {
        if let HostState::Stopped(_) = self.state {
            return Ok(self.state);
        }

        let document = match self.next_document() {
            Ok(Some(document)) => document,
            Ok(None) if self.shutdown.is_requested() => {
                return Ok(self.stop(StopReason::Interrupted));
            }
            Ok(None) => {
                tracing::debug!("input stream closed");
                return Ok(self.stop(StopReason::EndOfStream));
            }
            Err(HostError::Decode(err)) => {
                tracing::error!(error = %err, "malformed frame; stream cannot be realigned");
                return Ok(self.stop(StopReason::DecodeFailure));
            }
            Err(err) => return Err(err),
        };

        if self.shutdown.is_requested() {
            tracing::info!("shutdown requested; dropping pending request");
            return Ok(self.stop(StopReason::Interrupted));
        }

        self.requests += 1;
        let response = self.handle(document);
        if self.shutdown.is_requested() {
            tracing::info!("shutdown requested; discarding response");
            return Ok(self.stop(StopReason::Interrupted));
        }
        self.reply(response)?;
        Ok(self.state)
    }

    /// Read the next request, or `None` at end of input or when shutdown
    /// was requested before blocking.
    fn next_document(&mut self) -> Result<Option<Value>> {
        // Idle must be visible before the flag is checked, so a handler that
        // runs in between either sees idle or is seen here.
        self.shutdown.set_idle(true);
        if self.shutdown.is_requested() {
            self.shutdown.set_idle(false);
            return Ok(None);
        }
        let read = self.reader.read_message();
        self.shutdown.set_idle(false);
        read.map_err(HostError::from_read)
    }

    fn handle(&self, document: Value) -> Response {
        let request = match Request::from_document(document) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(error = %err, "rejecting request");
                return Response::failure_with(Value::Null, Value::Null, err.to_string());
            }
        };

        let action = request.action_name().unwrap_or("<missing>");
        tracing::debug!(action, "handling action");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            router::dispatch(&self.session, &request)
        }))
        .unwrap_or_else(|payload| Err(HostError::Internal(panic_message(payload.as_ref()))));

        match outcome {
            Ok(data) => Response::success(&request, data),
            Err(err) => {
                tracing::warn!(action, kind = ?err.kind(), error = %err, "action failed");
                Response::failure(&request, &err)
            }
        }
    }

    fn reply(&mut self, response: Response) -> Result<()> {
        if !response.success {
            self.failures += 1;
        }
        match self.writer.send_json(&response) {
            Ok(()) => Ok(()),
            Err(FrameError::PayloadTooLarge { size, max }) => {
                tracing::warn!(size, max, "response exceeds outbound limit");
                if response.success {
                    self.failures += 1;
                }
                let fallback = response.into_failure(RESPONSE_TOO_LARGE);
                self.writer.send_json(&fallback).map_err(HostError::Write)
            }
            Err(err) => Err(HostError::Write(err)),
        }
    }

    fn stop(&mut self, reason: StopReason) -> HostState {
        self.state = HostState::Stopped(reason);
        self.state
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
