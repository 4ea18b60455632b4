use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::blocks::Block;
use crate::client::{Config, LogMode};
use crate::error::{Result, ValenceError};
use crate::exit;
use crate::handles::{
    default_course_factory, default_user_factory, CourseFactory, CourseObject, UserFactory,
    UserObject,
};
use crate::log::RequestLog;
use crate::record::as_id;
use crate::response::{decode_body, value_at, LastResponse};
use crate::routes::escape_route;
use crate::signer::{RequestSigner, UserContext};
use crate::transport::{FileUpload, HttpTransport, RawResponse, Transport};

/// Whether the organization bootstrap of a session succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Root org ID and timezone are known
    Ready,
    /// The organization fetch failed; routes needing the root org ID get an
    /// empty segment
    Degraded,
}

/// Session-wide mutable state
struct Session {
    root_org_id: Option<i64>,
    timezone: Option<String>,
    role_ids: Option<HashMap<String, i64>>,
    org_type_ids: Option<HashMap<String, i64>>,
    last: LastResponse,
    exit_on_error: bool,
    return_object_on_create: bool,
    log: RequestLog,
}

struct Inner {
    signer: Box<dyn RequestSigner>,
    transport: Box<dyn Transport>,
    session: RefCell<Session>,
    course_factory: RefCell<CourseFactory>,
    user_factory: RefCell<UserFactory>,
}

/// A Valence API session.
///
/// Cloning is cheap and clones share the same session: lookup tables, last
/// response and settings. A session is single-threaded; give every thread
/// its own instance.
#[derive(Clone)]
pub struct Valence {
    inner: Rc<Inner>,
}

impl Valence {
    /// Create a session signing with `config`'s credentials over HTTP.
    ///
    /// Fetches the organization info to capture the root org ID and timezone.
    pub fn new(config: Config) -> Result<Self> {
        let signer = UserContext::from_config(&config);
        Self::with_parts(&config, signer, HttpTransport::new())
    }

    /// Create a session from the `D2L_VALENCE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Create a session with a custom signer and transport
    pub fn with_parts<S, T>(config: &Config, signer: S, transport: T) -> Result<Self>
    where
        S: RequestSigner + 'static,
        T: Transport + 'static,
    {
        let log = RequestLog::open(config.log_mode, config.log_file.as_deref())?;

        let valence = Valence {
            inner: Rc::new(Inner {
                signer: Box::new(signer),
                transport: Box::new(transport),
                session: RefCell::new(Session {
                    root_org_id: None,
                    timezone: None,
                    role_ids: None,
                    org_type_ids: None,
                    last: LastResponse::default(),
                    exit_on_error: config.exit_on_error,
                    return_object_on_create: config.return_object_on_create,
                    log,
                }),
                course_factory: RefCell::new(default_course_factory()),
                user_factory: RefCell::new(default_user_factory()),
            }),
        };

        if let Some(org) = valence.get_organization()? {
            let mut session = valence.inner.session.borrow_mut();
            session.root_org_id = org.identifier();
            session.timezone = org.time_zone().map(str::to_string);
        } else {
            warn!("organization bootstrap failed, session is degraded");
        }

        Ok(valence)
    }

    /// Whether the constructor reached the organization endpoint
    pub fn state(&self) -> SessionState {
        if self.inner.session.borrow().root_org_id.is_some() {
            SessionState::Ready
        } else {
            SessionState::Degraded
        }
    }

    /// Identifier of the root organization, `None` when degraded
    pub fn root_org_id(&self) -> Option<i64> {
        self.inner.session.borrow().root_org_id
    }

    /// Time zone reported by the root organization
    pub fn timezone(&self) -> Option<String> {
        self.inner.session.borrow().timezone.clone()
    }

    /// Root org ID as a route segment, empty when degraded
    pub(crate) fn root_org_segment(&self) -> String {
        self.root_org_id().map(|id| id.to_string()).unwrap_or_default()
    }

    /// Reconfigure request logging. The previous log file is closed.
    pub fn set_logging(&self, mode: LogMode, file: Option<&Path>) -> Result<()> {
        let log = RequestLog::open(mode, file)?;
        self.inner.session.borrow_mut().log = log;
        Ok(())
    }

    /// Switch between terminating the process and returning on error
    pub fn set_exit_on_error(&self, exit_on_error: bool) {
        self.inner.session.borrow_mut().exit_on_error = exit_on_error;
    }

    /// Whether a failed request ends the process
    pub fn exit_on_error(&self) -> bool {
        self.inner.session.borrow().exit_on_error
    }

    /// Make `create_course_offering` return a live handle instead of a record
    pub fn set_return_object_on_create(&self, enabled: bool) {
        self.inner.session.borrow_mut().return_object_on_create = enabled;
    }

    /// Whether creates return a live handle
    pub fn return_object_on_create(&self) -> bool {
        self.inner.session.borrow().return_object_on_create
    }

    /// Replace the constructor used by [`Valence::course`]
    pub fn set_course_factory<F>(&self, factory: F)
    where
        F: Fn(Valence, i64) -> Box<dyn CourseObject> + 'static,
    {
        *self.inner.course_factory.borrow_mut() = Rc::new(factory);
    }

    /// Replace the constructor used by [`Valence::user`]
    pub fn set_user_factory<F>(&self, factory: F)
    where
        F: Fn(Valence, i64) -> Box<dyn UserObject> + 'static,
    {
        *self.inner.user_factory.borrow_mut() = Rc::new(factory);
    }

    /// Lazy handle on a course offering
    pub fn course(&self, org_unit_id: i64) -> Box<dyn CourseObject> {
        let factory = self.inner.course_factory.borrow().clone();
        factory(self.clone(), org_unit_id)
    }

    /// Lazy handle on a user
    pub fn user(&self, user_id: i64) -> Box<dyn UserObject> {
        let factory = self.inner.user_factory.borrow().clone();
        factory(self.clone(), user_id)
    }

    /// Snapshot of the most recent exchange
    pub fn last_response(&self) -> LastResponse {
        self.inner.session.borrow().last.clone()
    }

    /// Status code of the most recent exchange
    pub fn response_code(&self) -> Option<u16> {
        self.inner.session.borrow().last.code
    }

    /// Decoded body of the most recent 2xx answer
    pub fn response_body(&self) -> Option<Value> {
        self.inner.session.borrow().last.body.clone()
    }

    /// Raw body of the most recent failed answer
    pub fn response_error(&self) -> Option<String> {
        self.inner.session.borrow().last.error.clone()
    }

    /// Whether the most recent status code was 2xx
    pub fn is_valid_response_code(&self) -> bool {
        self.inner.session.borrow().last.is_valid()
    }

    /// Populate the role and org-unit-type tables.
    ///
    /// Costs two requests (roles, then org-unit types). Called on first use
    /// by every role- or type-dependent method; a table stays populated even
    /// if its request failed.
    pub fn bootstrap_lookups(&self) -> Result<()> {
        let roles: HashMap<String, i64> = self
            .get_roles()?
            .into_iter()
            .filter_map(|role| Some((role.display_name()?.to_string(), role.identifier()?)))
            .collect();

        let types: HashMap<String, i64> = self
            .get_org_unit_types()?
            .into_iter()
            .filter_map(|t| Some((t.code()?.to_string(), t.id()?)))
            .collect();

        let mut session = self.inner.session.borrow_mut();
        session.role_ids = Some(roles);
        session.org_type_ids = Some(types);

        Ok(())
    }

    /// Whether both lookup tables are populated
    pub fn is_bootstrapped(&self) -> bool {
        let session = self.inner.session.borrow();
        session.role_ids.is_some() && session.org_type_ids.is_some()
    }

    /// Role ID for a role display name, bootstrapping the tables if needed
    pub fn role_id(&self, name: &str) -> Result<Option<i64>> {
        if self.inner.session.borrow().role_ids.is_none() {
            self.bootstrap_lookups()?;
        }

        let id = self
            .inner
            .session
            .borrow()
            .role_ids
            .as_ref()
            .and_then(|roles| roles.get(name).copied());
        if id.is_none() {
            warn!(role = name, "unknown role");
        }
        Ok(id)
    }

    /// Org-unit-type ID for a type code, bootstrapping the tables if needed
    pub fn org_unit_type_id(&self, code: &str) -> Result<Option<i64>> {
        if self.inner.session.borrow().org_type_ids.is_none() {
            self.bootstrap_lookups()?;
        }

        let id = self
            .inner
            .session
            .borrow()
            .org_type_ids
            .as_ref()
            .and_then(|types| types.get(code).copied());
        if id.is_none() {
            warn!(org_unit_type = code, "unknown org unit type");
        }
        Ok(id)
    }

    /// Issue a JSON request against `route`.
    ///
    /// Returns the decoded body of a 2xx answer (`None` when empty). Any other
    /// status follows the error policy: terminate the process, or record it
    /// in the last response and return `Ok(None)`.
    pub fn request_json(
        &self,
        route: &str,
        method: Method,
        data: Option<&Value>,
    ) -> Result<Option<Value>> {
        let uri = self
            .inner
            .signer
            .create_authenticated_uri(&escape_route(route), method.as_str())?;

        let start = Instant::now();
        let raw = self.inner.transport.send(method.clone(), &uri, data)?;
        debug!(
            method = %method,
            route,
            status = raw.status,
            elapsed = ?start.elapsed(),
            "valence request"
        );

        let body = if raw.is_success() {
            let body = decode_body(&raw.body);
            if body.is_none() && !raw.body.trim().is_empty() {
                warn!(route, "response body is not JSON");
            }
            body
        } else {
            None
        };

        {
            let mut session = self.inner.session.borrow_mut();
            session.last = LastResponse {
                code: Some(raw.status),
                body: body.clone(),
                error: (!raw.is_success()).then(|| raw.body.clone()),
            };
            if session.log.mode().logs_request(method.as_str()) {
                session.log.record(method.as_str(), route, data, raw.status);
            }
        }

        self.settle(raw)?;
        Ok(body)
    }

    /// Download `route` into the file at `path`
    pub fn request_file(&self, route: &str, path: &Path) -> Result<bool> {
        let uri = self
            .inner
            .signer
            .create_authenticated_uri(&escape_route(route), Method::GET.as_str())?;

        let mut file = File::create(path)?;
        let raw = self.inner.transport.download(&uri, &mut file)?;
        debug!(route, status = raw.status, path = %path.display(), "valence download");

        self.record_transfer(Method::GET.as_str(), route, None, &raw);
        self.settle(raw)
    }

    /// Upload the file at `path` as the multipart field `field` named `name`
    pub fn send_file(
        &self,
        route: &str,
        method: Method,
        path: &Path,
        field: &str,
        name: &str,
    ) -> Result<bool> {
        let uri = self
            .inner
            .signer
            .create_authenticated_uri(&escape_route(route), method.as_str())?;

        let upload = FileUpload {
            path,
            field,
            file_name: name,
        };
        let raw = self.inner.transport.upload(method.clone(), &uri, upload)?;
        debug!(method = %method, route, status = raw.status, "valence upload");

        let placeholder = Value::Array(vec![Value::String("placeholder".to_string())]);
        self.record_transfer(method.as_str(), route, Some(&placeholder), &raw);
        self.settle(raw)
    }

    fn record_transfer(&self, method: &str, route: &str, data: Option<&Value>, raw: &RawResponse) {
        let mut session = self.inner.session.borrow_mut();
        session.last = LastResponse {
            code: Some(raw.status),
            body: None,
            error: (!raw.is_success()).then(|| raw.body.clone()),
        };
        if session.log.mode().logs_transfer() {
            session.log.record(method, route, data, raw.status);
        }
    }

    /// Apply the error policy to a finished exchange
    fn settle(&self, raw: RawResponse) -> Result<bool> {
        if raw.is_success() {
            return Ok(true);
        }

        let err = ValenceError::http(raw.status, raw.body);
        if self.exit_on_error() {
            exit::terminate(&err);
        }

        debug!(error = %err, "request failed");
        Ok(false)
    }

    pub(crate) fn fetch<T: Block>(&self, route: &str) -> Result<Option<T>> {
        let body = self.request_json(route, Method::GET, None)?;
        Ok(body.and_then(T::from_value))
    }

    pub(crate) fn fetch_many<T: Block>(&self, route: &str) -> Result<Vec<T>> {
        let body = self.request_json(route, Method::GET, None)?;
        Ok(body.map(T::many).unwrap_or_default())
    }

    pub(crate) fn mutate<T, B>(&self, route: &str, method: Method, input: &B) -> Result<Option<T>>
    where
        T: Block,
        B: Serialize + ?Sized,
    {
        let data = serde_json::to_value(input)?;
        let body = self.request_json(route, method, Some(&data))?;
        Ok(body.and_then(T::from_value))
    }

    pub(crate) fn delete(&self, route: &str) -> Result<()> {
        self.request_json(route, Method::DELETE, None)?;
        Ok(())
    }

    /// GET `route` and pluck the integer at `path` out of the body
    pub(crate) fn lookup(&self, route: &str, path: &str) -> Result<Option<i64>> {
        let body = self.request_json(route, Method::GET, None)?;
        Ok(body.as_ref().and_then(|b| value_at(b, path)).and_then(as_id))
    }
}

impl std::fmt::Debug for Valence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.inner.session.borrow();
        f.debug_struct("Valence")
            .field("root_org_id", &session.root_org_id)
            .field("timezone", &session.timezone)
            .field("bootstrapped", &(session.role_ids.is_some() && session.org_type_ids.is_some()))
            .field("last", &session.last)
            .finish()
    }
}
