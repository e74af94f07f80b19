use serde::Serialize;
use serde_json::{Map, Value};

/// The `requestContext.authorizer` value of a proxy event.
///
/// A request starts `Unset`. Overrides (environment, then header) move it to `Overridden`,
/// each one replacing the previous. Only when nothing overrode it is a record synthesized
/// from the request credentials and the bearer token claims.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(untagged)]
pub enum AuthorizerResult {
    #[default]
    Unset,
    Overridden(Value),
    Synthesized(Map<String, Value>),
}

impl AuthorizerResult {
    /// Replaces whatever the current state is with an externally supplied value.
    pub fn overridden_by(self, value: Value) -> Self {
        Self::Overridden(value)
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Keeps an override when there is one, otherwise synthesizes the record.
    pub fn or_synthesize<F>(self, synthesize: F) -> Self
    where
        F: FnOnce() -> SynthesizedAuthorizer,
    {
        if self.is_set() {
            self
        } else {
            Self::Synthesized(synthesize().into_map())
        }
    }
}

/// Authorizer record built when no override is configured.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SynthesizedAuthorizer {
    /// Context object attached to the request credentials.
    pub context: Map<String, Value>,
    pub claims: Option<Value>,
    pub scopes: Option<Vec<String>>,
    pub principal_id: String,
}

impl SynthesizedAuthorizer {
    /// Merges `claims`, `scopes` and `principalId` on top of the credentials context.
    /// Absent claims and scopes are left out, `principalId` always wins over the context.
    pub fn into_map(self) -> Map<String, Value> {
        let mut record = self.context;

        if let Some(claims) = self.claims {
            record.insert("claims".to_owned(), claims);
        }
        if let Some(scopes) = self.scopes {
            record.insert(
                "scopes".to_owned(),
                Value::Array(scopes.into_iter().map(Value::String).collect()),
            );
        }
        record.insert("principalId".to_owned(), Value::String(self.principal_id));

        record
    }
}
