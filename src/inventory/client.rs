use crate::config::{Config, Credentials};
use crate::inventory::{EntitySearch, SearchRequest, SearchResponse, UserEntity};
use crate::{EntlookError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// One client-wide deadline for inventory calls, independent of the
/// control-plane ping budget.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Requested lifetime of an exchanged token. The token only needs to
/// outlive a single invocation.
const TOKEN_EXPIRY_SECS: u32 = 3600;

/// HTTP client for the inventory platform.
///
/// Construction does no I/O. When the configuration carries a key pair
/// instead of a ready token, the pair is exchanged for a token once, on
/// the first search, and cached for the rest of the invocation.
pub struct InventoryClient {
    http: reqwest::Client,
    api_url: String,
    account: String,
    subaccount: Option<String>,
    credentials: Credentials,
    token: OnceCell<String>,
}

impl InventoryClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()
            .map_err(|e| EntlookError::Config(format!("could not build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            account: config.account.clone(),
            subaccount: config.subaccount.clone(),
            credentials: config.credentials.clone(),
            token: OnceCell::new(),
        })
    }

    async fn token(&self) -> Result<&str> {
        self.token
            .get_or_try_init(|| async {
                match &self.credentials {
                    Credentials::Token(token) => Ok(token.clone()),
                    Credentials::KeyPair { key_id, secret } => {
                        self.exchange_token(key_id, secret).await
                    }
                }
            })
            .await
            .map(String::as_str)
    }

    async fn exchange_token(&self, key_id: &str, secret: &str) -> Result<String> {
        debug!("requesting API token for key {}", key_id);

        let response = self
            .http
            .post(format!("{}/access/tokens", self.api_url))
            .header("X-API-Secret", secret)
            .json(&TokenRequest {
                key_id,
                expiry_secs: TOKEN_EXPIRY_SECS,
            })
            .send()
            .await
            .map_err(auth_error)?
            .error_for_status()
            .map_err(auth_error)?;

        let reply: TokenReply = response.json().await.map_err(auth_error)?;
        Ok(reply.token)
    }

    async fn search<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &SearchRequest,
        entity: &str,
    ) -> Result<SearchResponse<T>> {
        let token = self.token().await?;

        debug!("searching inventory at {}", path);
        let mut call = self
            .http
            .post(format!("{}/{}", self.api_url, path))
            .bearer_auth(token)
            .header("Account-Name", &self.account)
            .json(request);
        if let Some(subaccount) = &self.subaccount {
            call = call.header("Subaccount-Name", subaccount);
        }

        let response = call
            .send()
            .await
            .map_err(|e| search_error(entity, e))?
            .error_for_status()
            .map_err(|e| search_error(entity, e))?;

        response.json().await.map_err(|e| search_error(entity, e))
    }
}

#[async_trait]
impl EntitySearch for InventoryClient {
    async fn search_users(&self, request: &SearchRequest) -> Result<SearchResponse<UserEntity>> {
        self.search("entities/users/search", request, "user").await
    }

    async fn search_machines(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse<serde_json::Value>> {
        self.search("entities/machines/search", request, "machine")
            .await
    }
}

fn auth_error(e: reqwest::Error) -> EntlookError {
    EntlookError::Auth(e.to_string())
}

fn search_error(entity: &str, e: reqwest::Error) -> EntlookError {
    EntlookError::Search(format!("unable to load {} entities: {}", entity, e))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenRequest<'a> {
    key_id: &'a str,
    expiry_secs: u32,
}

#[derive(Deserialize)]
struct TokenReply {
    token: String,
}
