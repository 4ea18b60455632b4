//! Scripted transport shared by the facade tests.
//!
//! Answers requests from a queue of canned responses and records every
//! exchange, so tests can assert on verbs, routes and bodies without a
//! server.

#![allow(dead_code)]

use reqwest::Method;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Write;
use std::rc::Rc;
use valence::{Config, FileUpload, RawResponse, Result, Transport, UserContext, Valence};

pub const BASE_URL: &str = "https://lms.example.edu";
pub const ROOT_ORG_ID: i64 = 6606;

/// One request seen by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: String,
    /// Route as signed, without host and authentication parameters
    pub route: String,
    pub uri: String,
    pub body: Option<Value>,
    /// Multipart field and file name of an upload
    pub upload: Option<(String, String)>,
}

#[derive(Default)]
struct Script {
    responses: VecDeque<(u16, String)>,
    calls: Vec<Call>,
}

/// Transport handle; clones share the same script
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON answer
    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.respond_raw(status, &body.to_string())
    }

    /// Queue an answer with a verbatim body
    pub fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.script
            .borrow_mut()
            .responses
            .push_back((status, body.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.borrow().calls.clone()
    }

    pub fn routes(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.route).collect()
    }

    pub fn call_count(&self) -> usize {
        self.script.borrow().calls.len()
    }

    pub fn last_call(&self) -> Call {
        self.script
            .borrow()
            .calls
            .last()
            .cloned()
            .expect("no request was made")
    }

    fn next(&self, call: Call) -> RawResponse {
        let mut script = self.script.borrow_mut();
        script.calls.push(call);
        let (status, body) = script
            .responses
            .pop_front()
            .unwrap_or((599, "no scripted response".to_string()));
        RawResponse::new(status, body)
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> Result<RawResponse> {
        Ok(self.next(Call {
            method: method.to_string(),
            route: route_of(uri),
            uri: uri.to_string(),
            body: body.cloned(),
            upload: None,
        }))
    }

    fn download(&self, uri: &str, sink: &mut dyn Write) -> Result<RawResponse> {
        let raw = self.next(Call {
            method: "GET".to_string(),
            route: route_of(uri),
            uri: uri.to_string(),
            body: None,
            upload: None,
        });

        if raw.is_success() {
            sink.write_all(raw.body.as_bytes())?;
            return Ok(RawResponse::new(raw.status, ""));
        }
        Ok(raw)
    }

    fn upload(&self, method: Method, uri: &str, file: FileUpload<'_>) -> Result<RawResponse> {
        Ok(self.next(Call {
            method: method.to_string(),
            route: route_of(uri),
            uri: uri.to_string(),
            body: None,
            upload: Some((file.field.to_string(), file.file_name.to_string())),
        }))
    }
}

/// Strip the host and the trailing `x_a..x_t` parameters from a signed URI
pub fn route_of(uri: &str) -> String {
    let route = uri.strip_prefix(BASE_URL).unwrap_or(uri);
    let route = match route.find("x_a=") {
        Some(start) => &route[..start],
        None => route,
    };
    route.trim_end_matches(['?', '&']).to_string()
}

pub fn organization() -> Value {
    json!({
        "Identifier": ROOT_ORG_ID.to_string(),
        "Name": "Example University",
        "TimeZone": "America/Toronto"
    })
}

pub fn roles() -> Value {
    json!([
        {"Identifier": "110", "DisplayName": "Student", "Code": null},
        {"Identifier": "109", "DisplayName": "Instructor", "Code": null}
    ])
}

pub fn org_unit_types() -> Value {
    json!([
        {"Id": 1, "Code": "Organization", "Name": "Organization"},
        {"Id": 3, "Code": "Course Offering", "Name": "Course Offering"},
        {"Id": 5, "Code": "Semester", "Name": "Semester"},
        {"Id": 2, "Code": "Course Template", "Name": "Course Template"},
        {"Id": 101, "Code": "Department", "Name": "Department"}
    ])
}

pub fn config() -> Config {
    Config::new("https", "lms.example.edu")
        .with_app("app-id", "app-key")
        .with_user("user-id", "user-key")
        .with_exit_on_error(false)
}

/// A session whose organization bootstrap succeeded; the bootstrap call is
/// already in the transport's call log
pub fn session() -> (Valence, ScriptedTransport) {
    session_with(config())
}

pub fn session_with(config: Config) -> (Valence, ScriptedTransport) {
    let transport = ScriptedTransport::new();
    transport.respond(200, organization());

    let signer = UserContext::from_config(&config);
    let valence =
        Valence::with_parts(&config, signer, transport.clone()).expect("session construction");
    (valence, transport)
}

/// Queue the two lookup-table bootstrap answers
pub fn script_lookups(transport: &ScriptedTransport) {
    transport.respond(200, roles()).respond(200, org_unit_types());
}
