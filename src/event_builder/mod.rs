//! Turns a request captured by the local HTTP layer into the event API Gateway sends to a
//! function through a Lambda proxy integration.
//!
//! The build never fails: malformed authorizer overrides are logged and skipped, undecodable
//! tokens are ignored and every context field has a placeholder.

use model::event::Event;
use model::raw_request::RawRequest;
use model::stage::StageContext;

use crate::config::Config;
use crate::ids::IdGenerator;

pub use self::authorizer::{AuthorizerLogger, AUTHORIZER_OVERRIDE_HEADER, DEFAULT_PRINCIPAL_ID};
pub use self::headers::NormalizedHeaders;

mod authorizer;
pub mod context;
mod headers;
mod query;

pub struct EventBuilder<'a> {
    config: &'a Config,
    id_generator: &'a dyn IdGenerator,
    logger: Option<&'a dyn AuthorizerLogger>,
}

impl<'a> EventBuilder<'a> {
    pub fn new(config: &'a Config, id_generator: &'a dyn IdGenerator) -> Self {
        Self {
            config,
            id_generator,
            logger: None,
        }
    }

    /// Sends malformed authorizer override errors to `logger` instead of `tracing`.
    pub fn with_logger(mut self, logger: &'a dyn AuthorizerLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn build(&self, request: &RawRequest, stage: &StageContext) -> Event {
        let (headers, body) = headers::normalize(request);
        let (query_string_parameters, multi_value_query_string_parameters) =
            query::parse(&request.url);

        let authorizer =
            authorizer::resolve(self.config, &headers, request.auth.as_ref(), self.logger);

        let http_method = request.method.to_uppercase();
        let resource = context::resource(&request.route.path, stage);
        let request_context = context::request_context(context::ContextInput {
            config: self.config,
            id_generator: self.id_generator,
            headers: &headers,
            request,
            stage,
            http_method: &http_method,
            authorizer,
        });

        tracing::info!(
            http_method = %http_method,
            resource = %resource,
            request_id = %request_context.request_id,
            "Proxy event built"
        );

        let path_parameters = (!request.params.is_empty()).then(|| request.params.clone());
        let (headers, multi_value_headers) = headers.into_maps();

        Event {
            body,
            headers,
            http_method,
            is_base64_encoded: false,
            multi_value_headers,
            multi_value_query_string_parameters,
            path: stage.path.clone(),
            path_parameters,
            query_string_parameters,
            request_context,
            resource,
            stage_variables: stage.stage_variables.clone(),
        }
    }
}
