use serde_json::{json, Map, Value};

/// A transport-neutral request to one of the service routes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Request {
    pub route: String,

    /// The caller's `Origin`, if it sent one.
    pub origin: Option<String>,

    /// The raw request body, expected to hold a JSON object.
    pub body: Option<String>,
}

impl Request {
    pub fn new(route: impl Into<String>, body: impl Into<String>) -> Request {
        Request { route: route.into(), origin: None, body: Some(body.into()) }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Request {
        self.origin = Some(origin.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl Response {
    pub fn new(status: u16, body: Value) -> Response {
        Response { status, headers: Vec::new(), body }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Response {
        let message: String = message.into();
        Response::new(status, json!({ "error": message }))
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A request the service refuses before any scanning happens.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CallerContractError {
    #[error("request body must be a JSON object")]
    BodyNotObject,

    #[error("`source` must be a string")]
    SourceNotString,

    #[error("`mode` must be \"strict\" or \"resilient\"")]
    UnknownMode,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanMode {
    #[default]
    Resilient,
    Strict,
}

/// The decoded body of a route request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Payload {
    pub source: String,
    pub mode: ScanMode,
}

impl Payload {
    /// Decodes `{"source": ..., "mode": ...}`. A missing, empty or unparsable body and a JSON
    /// `null` all read as an empty object, so `source` defaults to the empty string.
    pub fn parse(body: Option<&str>) -> Result<Payload, CallerContractError> {
        let value = body.and_then(|text| serde_json::from_str::<Value>(text).ok());
        let fields = match value {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(fields)) => fields,
            Some(_) => return Err(CallerContractError::BodyNotObject),
        };

        let source = match fields.get("source") {
            None => String::new(),
            Some(Value::String(source)) => source.clone(),
            Some(_) => return Err(CallerContractError::SourceNotString),
        };
        let mode = match fields.get("mode") {
            None | Some(Value::Null) => ScanMode::Resilient,
            Some(Value::String(mode)) if mode == "resilient" => ScanMode::Resilient,
            Some(Value::String(mode)) if mode == "strict" => ScanMode::Strict,
            Some(_) => return Err(CallerContractError::UnknownMode),
        };
        Ok(Payload { source, mode })
    }
}
