//! Observability hooks for the requests a client sends.
//!
//! Every registered [`HttpLogger`] sees each outgoing request and each response.
//! Hooks only borrow the data, so they cannot change what is sent or returned.

use std::fmt;

use reqwest::{Method, StatusCode};

/// A request about to be dispatched. The `Authorization` header is never included.
#[derive(Debug, Clone, Copy)]
pub struct LoggedRequest<'a> {
    pub method: &'a Method,
    pub url: &'a str,
    /// The JSON body, or a summary of the parts for multipart uploads.
    pub body: Option<&'a str>,
}

/// A response as received, before it is decoded.
#[derive(Debug, Clone, Copy)]
pub struct LoggedResponse<'a> {
    pub method: &'a Method,
    pub url: &'a str,
    pub status: StatusCode,
    pub body: &'a [u8],
}

/// A request/response observer registered on a client's configuration.
pub trait HttpLogger: Send + Sync + fmt::Debug {
    fn log_request(&self, request: &LoggedRequest<'_>);

    fn log_response(&self, response: &LoggedResponse<'_>);
}

/// How much a [`TracingLogger`] records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Method, URL and status only.
    #[default]
    Basic,
    /// Also the full request and response bodies.
    Body,
}

/// Emits `tracing` events at `debug` level for every request and response.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger {
    level: LogLevel,
}

impl TracingLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }
}

impl HttpLogger for TracingLogger {
    fn log_request(&self, request: &LoggedRequest<'_>) {
        match (self.level, request.body) {
            (LogLevel::Body, Some(body)) => {
                tracing::debug!(method = %request.method, url = request.url, body, "--> request")
            }
            _ => tracing::debug!(method = %request.method, url = request.url, "--> request"),
        }
    }

    fn log_response(&self, response: &LoggedResponse<'_>) {
        match self.level {
            LogLevel::Body => tracing::debug!(
                method = %response.method,
                url = response.url,
                status = response.status.as_u16(),
                body = %String::from_utf8_lossy(response.body),
                "<-- response"
            ),
            LogLevel::Basic => tracing::debug!(
                method = %response.method,
                url = response.url,
                status = response.status.as_u16(),
                "<-- response"
            ),
        }
    }
}
