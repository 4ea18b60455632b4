//! HTTP transport seam.
//!
//! The facade never talks to `reqwest` directly: it hands an already signed
//! URI to a [`Transport`] and gets back the status code and body for any HTTP
//! answer. Only transport-level failures (connection, I/O) are errors here;
//! interpreting the status is left to the caller.

use crate::client::{create_rest_client, create_transfer_client};
use crate::error::Result;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::Method;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Status and raw body of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        RawResponse {
            status,
            body: body.into(),
        }
    }

    /// Any status in the 200-299 range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A local file sent as one multipart field
#[derive(Debug, Clone, Copy)]
pub struct FileUpload<'a> {
    /// Local file to send
    pub path: &'a Path,
    /// Multipart field name
    pub field: &'a str,
    /// Remote file name
    pub file_name: &'a str,
}

/// Performs HTTP requests against authenticated URIs.
pub trait Transport {
    /// Send a request with an optional JSON body
    fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> Result<RawResponse>;

    /// GET a binary resource, streaming a successful body into `sink`.
    /// On error statuses the body is returned instead of written.
    fn download(&self, uri: &str, sink: &mut dyn Write) -> Result<RawResponse>;

    /// Send a local file as a multipart upload
    fn upload(&self, method: Method, uri: &str, file: FileUpload<'_>) -> Result<RawResponse>;
}

/// Transport backed by `reqwest`'s blocking client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    transfer_client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            client: create_rest_client(),
            transfer_client: create_transfer_client(),
        }
    }

    /// Use caller-provided clients, e.g. with a proxy or custom TLS settings
    pub fn with_clients(client: Client, transfer_client: Client) -> Self {
        HttpTransport {
            client,
            transfer_client,
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> Result<RawResponse> {
        let mut request = self.client.request(method, uri);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(RawResponse { status, body })
    }

    fn download(&self, uri: &str, sink: &mut dyn Write) -> Result<RawResponse> {
        let mut response = self.transfer_client.get(uri).send()?;
        let status = response.status();

        if !status.is_success() {
            return Ok(RawResponse {
                status: status.as_u16(),
                body: response.text()?,
            });
        }

        std::io::copy(&mut response, &mut *sink)?;
        sink.flush()?;

        Ok(RawResponse::new(status.as_u16(), ""))
    }

    fn upload(&self, method: Method, uri: &str, file: FileUpload<'_>) -> Result<RawResponse> {
        let part = Part::file(file.path)?.file_name(file.file_name.to_string());
        let form = Form::new().part(file.field.to_string(), part);

        let response = self
            .transfer_client
            .request(method, uri)
            .multipart(form)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(RawResponse { status, body })
    }
}
