//! Environment-sourced configuration
//!
//! Every environment read happens here, once, at startup. The rest of the
//! crate receives an explicit [`Config`] and stays free of implicit global
//! state.

use crate::{EntlookError, Result};

pub const ENV_API_URL: &str = "ENTLOOK_API_URL";
pub const ENV_ACCOUNT: &str = "ENTLOOK_ACCOUNT";
pub const ENV_SUBACCOUNT: &str = "ENTLOOK_SUBACCOUNT";
pub const ENV_API_KEY: &str = "ENTLOOK_API_KEY";
pub const ENV_API_SECRET: &str = "ENTLOOK_API_SECRET";
pub const ENV_API_TOKEN: &str = "ENTLOOK_API_TOKEN";
pub const ENV_CP_TARGET: &str = "ENTLOOK_CP_TARGET";
pub const ENV_CP_PORT: &str = "ENTLOOK_CP_PORT";
pub const ENV_COMPONENT_NAME: &str = "ENTLOOK_COMPONENT_NAME";

/// Credentials for the inventory platform.
///
/// A ready token is used as-is; a key pair is exchanged for a token on
/// first use.
#[derive(Debug, Clone)]
pub enum Credentials {
    Token(String),
    KeyPair { key_id: String, secret: String },
}

/// Address of the local control-plane companion.
///
/// Either a full `host:port` target or just a port on localhost, matching
/// the two ways the companion advertises itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanionAddress {
    Target(String),
    LocalPort(u16),
}

impl CompanionAddress {
    /// Dial target as `host:port`.
    pub fn target(&self) -> String {
        match self {
            CompanionAddress::Target(target) => target.clone(),
            CompanionAddress::LocalPort(port) => format!("localhost:{}", port),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub account: String,
    pub subaccount: Option<String>,
    pub credentials: Credentials,
    pub companion: CompanionAddress,
    pub component_name: String,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Fails before any lookup is attempted if a mandatory value is
    /// absent. Variables set to the empty string count as absent.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but with an injectable source, so
    /// tests never have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut missing = Vec::new();

        let api_url = get(ENV_API_URL);
        if api_url.is_none() {
            missing.push(ENV_API_URL);
        }
        let account = get(ENV_ACCOUNT);
        if account.is_none() {
            missing.push(ENV_ACCOUNT);
        }
        let component_name = get(ENV_COMPONENT_NAME);
        if component_name.is_none() {
            missing.push(ENV_COMPONENT_NAME);
        }

        let credentials = match (get(ENV_API_TOKEN), get(ENV_API_KEY), get(ENV_API_SECRET)) {
            (Some(token), _, _) => Some(Credentials::Token(token)),
            (None, Some(key_id), Some(secret)) => Some(Credentials::KeyPair { key_id, secret }),
            (None, Some(_), None) => {
                missing.push(ENV_API_SECRET);
                None
            }
            (None, None, Some(_)) => {
                missing.push(ENV_API_KEY);
                None
            }
            (None, None, None) => {
                missing.push(ENV_API_TOKEN);
                None
            }
        };

        let companion = match (get(ENV_CP_TARGET), get(ENV_CP_PORT)) {
            (Some(target), _) => Some(CompanionAddress::Target(target)),
            (None, Some(port)) => {
                let port = port.parse::<u16>().map_err(|e| {
                    EntlookError::Config(format!("{} must be a port number: {}", ENV_CP_PORT, e))
                })?;
                Some(CompanionAddress::LocalPort(port))
            }
            (None, None) => {
                missing.push(ENV_CP_TARGET);
                None
            }
        };

        let (Some(api_url), Some(account), Some(component_name), Some(credentials), Some(companion)) =
            (api_url, account, component_name, credentials, companion)
        else {
            return Err(EntlookError::Config(format!(
                "one or more missing configuration values: {}",
                missing.join(", ")
            )));
        };

        Ok(Self {
            api_url,
            account,
            subaccount: get(ENV_SUBACCOUNT),
            credentials,
            companion,
            component_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (ENV_API_URL, "https://example.test/api/v2"),
            (ENV_ACCOUNT, "acme"),
            (ENV_API_TOKEN, "tok-123"),
            (ENV_CP_TARGET, "localhost:7711"),
            (ENV_COMPONENT_NAME, "lookup"),
        ])
    }

    fn config_from(vars: HashMap<&'static str, &'static str>) -> Result<Config> {
        Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn builds_from_complete_environment() {
        let config = config_from(base_vars()).unwrap();
        assert_eq!(config.account, "acme");
        assert_eq!(config.component_name, "lookup");
        assert_eq!(config.companion.target(), "localhost:7711");
        assert!(matches!(config.credentials, Credentials::Token(_)));
        assert!(config.subaccount.is_none());
    }

    #[test]
    fn explicit_target_wins_over_port() {
        let mut vars = base_vars();
        vars.insert(ENV_CP_PORT, "9999");
        let config = config_from(vars).unwrap();
        assert_eq!(config.companion.target(), "localhost:7711");
    }

    #[test]
    fn port_alone_dials_localhost() {
        let mut vars = base_vars();
        vars.remove(ENV_CP_TARGET);
        vars.insert(ENV_CP_PORT, "7712");
        let config = config_from(vars).unwrap();
        assert_eq!(config.companion, CompanionAddress::LocalPort(7712));
        assert_eq!(config.companion.target(), "localhost:7712");
    }

    #[test]
    fn key_pair_accepted_without_token() {
        let mut vars = base_vars();
        vars.remove(ENV_API_TOKEN);
        vars.insert(ENV_API_KEY, "KEY_1");
        vars.insert(ENV_API_SECRET, "s3cret");
        let config = config_from(vars).unwrap();
        assert!(matches!(config.credentials, Credentials::KeyPair { .. }));
    }

    #[test]
    fn half_a_key_pair_reports_the_missing_half() {
        let mut vars = base_vars();
        vars.remove(ENV_API_TOKEN);
        vars.insert(ENV_API_KEY, "KEY_1");
        let err = config_from(vars).unwrap_err();
        assert!(err.to_string().contains(ENV_API_SECRET));
    }

    #[test]
    fn missing_values_are_reported_together() {
        let mut vars = base_vars();
        vars.remove(ENV_ACCOUNT);
        vars.remove(ENV_COMPONENT_NAME);
        let err = config_from(vars).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(ENV_ACCOUNT));
        assert!(message.contains(ENV_COMPONENT_NAME));
    }

    #[test]
    fn empty_string_counts_as_absent() {
        let mut vars = base_vars();
        vars.insert(ENV_ACCOUNT, "");
        let err = config_from(vars).unwrap_err();
        assert!(err.to_string().contains(ENV_ACCOUNT));
    }

    #[test]
    fn bad_port_is_a_config_error() {
        let mut vars = base_vars();
        vars.remove(ENV_CP_TARGET);
        vars.insert(ENV_CP_PORT, "not-a-port");
        let err = config_from(vars).unwrap_err();
        assert!(err.to_string().contains(ENV_CP_PORT));
    }
}
