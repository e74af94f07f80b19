use common::config::ConfigLoader;
use serde::{self, Deserialize};

/// Environment driven settings of the emulator. Every value is optional: an absent or empty
/// variable means the built-in placeholder is used.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// JSON document used verbatim as `requestContext.authorizer`.
    pub authorizer: Option<String>,

    /// Principal id of the synthesized authorizer when the request carries none.
    pub principal_id: Option<String>,

    pub sls_account_id: Option<String>,
    pub sls_api_key: Option<String>,
    pub sls_api_key_id: Option<String>,
    pub sls_caller: Option<String>,
    pub sls_cognito_authentication_provider: Option<String>,
    pub sls_cognito_authentication_type: Option<String>,
    pub sls_cognito_identity_id: Option<String>,
    pub sls_cognito_identity_pool_id: Option<String>,

    /// Raises the log level from WARN to INFO.
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

fn default_verbose() -> bool {
    false
}

impl Config {
    /// Reads the process environment (and `.env` files) for the given stage.
    pub fn load(stage: &str) -> Result<Self, envy::Error> {
        ConfigLoader::load_for_stage::<Self>(stage)
    }

    /// Builds a configuration from `(NAME, value)` pairs, leaving the process environment
    /// untouched.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        ConfigLoader::from_pairs::<Self, _, _, _>(pairs)
    }
}

/// Empty variables behave as if they were not set.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_emulator_variables() {
        let config = Config::from_pairs([
            ("AUTHORIZER", r#"{"x":1}"#),
            ("PRINCIPAL_ID", "env-principal"),
            ("SLS_COGNITO_IDENTITY_POOL_ID", "pool"),
            ("UNRELATED", "ignored"),
        ])
        .unwrap();

        assert_eq!(config.authorizer.as_deref(), Some(r#"{"x":1}"#));
        assert_eq!(config.principal_id.as_deref(), Some("env-principal"));
        assert_eq!(config.sls_cognito_identity_pool_id.as_deref(), Some("pool"));
        assert!(config.sls_caller.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn empty_values_are_treated_as_unset() {
        let config = Config::from_pairs([("PRINCIPAL_ID", "")]).unwrap();

        assert_eq!(non_empty(&config.principal_id), None);
    }
}
