//! Request handling for editor front ends, independent of any particular transport.
//!
//! An embedding application decodes its transport's requests into [Request]s, hands them to a
//! shared [Service], and encodes the returned [Response]s. Two routes are served:
//!
//! * `/lex` scans `source` (resiliently unless `mode` is `"strict"`) and answers with its token
//!   rows plus any lexical errors.
//! * `/validate` scans `source` strictly and answers with the structural validation result,
//!   with status 400 when lexing fails or the structure is invalid.
//!
//! Callers sending a non-string `source` are refused with status 400 before anything is scanned.

pub mod request;

mod routes;

use tracing::{debug, info, warn};

use crate::config::{Config, ConfigError, ServiceConfig};
use crate::toolchain::lexer::Vocabulary;

pub use request::{CallerContractError, Payload, Request, Response, ScanMode};

pub const LEX_ROUTE: &str = "/lex";
pub const VALIDATE_ROUTE: &str = "/validate";

pub struct Service {
    vocabulary: Vocabulary,
    config: ServiceConfig,
}

assert_impl_all!(Service: Send, Sync);

impl Service {
    pub fn new(vocabulary: Vocabulary, config: ServiceConfig) -> Service {
        Service { vocabulary, config }
    }

    pub fn from_config(config: &Config) -> Result<Service, ConfigError> {
        Ok(Service::new(config.vocabulary()?, config.service.clone()))
    }

    pub fn handle(&self, request: &Request) -> Response {
        let route = request.route.as_str();
        debug!(route, origin = ?request.origin, "handling request");

        let handler: fn(&Payload, &Vocabulary) -> Response = match route {
            LEX_ROUTE => routes::lex,
            VALIDATE_ROUTE => routes::validate,
            _ => {
                warn!(route, "no such route");
                return Response::error(404, "no such route");
            }
        };

        let mut response = match Payload::parse(request.body.as_deref()) {
            Ok(payload) => {
                debug!(route, mode = ?payload.mode, length = payload.source.len(), "decoded payload");
                handler(&payload, &self.vocabulary)
            }
            Err(error) => {
                warn!(route, %error, "rejected request");
                Response::error(400, error.to_string())
            }
        };

        if let Some(origin) = self.config.allowed_origin(route, request.origin.as_deref()) {
            response.headers.push(("Access-Control-Allow-Origin".to_string(), origin));
        }
        info!(route, status = response.status, "handled request");
        response
    }
}
