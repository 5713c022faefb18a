//! REST banking API client
//!
//! Handles communication with the remote banking service: the login
//! exchange, the authenticated account fetch, and the transfer submission.

use std::time::Duration;

use anyhow::{Context, Result as AnyResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, Credential, TransferRequest};
use crate::ports::BankGateway;

/// Default request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fallback message when a transfer rejection carries no payload
const TRANSFER_FALLBACK_MESSAGE: &str = "check the transfer details";

// =============================================================================
// API Response Models
// =============================================================================

/// Login request body
#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

/// Account as returned by `GET /accounts/me`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAccount {
    /// Account ID (API returns number, we accept both)
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    #[serde(deserialize_with = "deserialize_amount")]
    balance: Decimal,
    account_number: String,
}

/// Transfer request body for `POST /transactions/transfer`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferPayload<'a> {
    source_account_id: &'a str,
    target_account_id: &'a str,
    /// Serialized as a decimal string, matching the service contract
    amount: Decimal,
}

/// Deserialize ID that can be number or string
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::String(s) => Ok(s),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

/// Deserialize amount that can be number or string
fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => {
            let s = n.to_string();
            s.parse::<Decimal>()
                .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e)))
        }
        JsonValue::String(s) => s
            .parse::<Decimal>()
            .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e))),
        _ => Err(D::Error::custom("expected number or string for amount")),
    }
}

// =============================================================================
// REST HTTP Client
// =============================================================================

/// REST banking API client
#[derive(Debug)]
pub struct RestBankGateway {
    client: Client,
    base_url: String,
}

impl RestBankGateway {
    /// Create a new gateway for the given API base URL.
    pub fn new(base_url: &str) -> AnyResult<Self> {
        Self::new_with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Create a new gateway with a custom request timeout.
    pub fn new_with_timeout(base_url: &str, timeout: Duration) -> AnyResult<Self> {
        if base_url.trim().is_empty() {
            anyhow::bail!("API base URL cannot be empty");
        }
        Url::parse(base_url).context("Invalid API base URL")?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Map request errors to user-facing messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::remote("connection to the banking service timed out")
        } else if error.is_connect() {
            Error::remote("unable to reach the banking service")
        } else {
            Error::remote(format!("request failed: {}", error))
        }
    }

    /// Unauthorized and forbidden are equivalent rejection classes.
    fn is_auth_rejection(status: StatusCode) -> bool {
        matches!(
            status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        )
    }
}

#[async_trait]
impl BankGateway for RestBankGateway {
    async fn login(&self, identity: &str, secret: &str) -> Result<Credential> {
        let url = format!("{}/auth/login", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&LoginPayload {
                email: identity,
                password: secret,
            })
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if status.is_client_error() {
            return Err(Error::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(Error::remote(format!(
                "authentication service error: HTTP {}",
                status.as_u16()
            )));
        }

        // The service answers with the bare token; tolerate a JSON-quoted one.
        let body = response
            .text()
            .await
            .map_err(|e| self.map_request_error(e))?;
        let token = body.trim().trim_matches('"');
        if token.is_empty() {
            return Err(Error::remote("authentication service returned no token"));
        }

        Ok(Credential::new(token))
    }

    async fn fetch_accounts(&self, credential: &Credential) -> Result<Vec<Account>> {
        let url = format!("{}/accounts/me", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(credential.token())
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if Self::is_auth_rejection(status) {
            return Err(Error::AuthExpired);
        }
        if !status.is_success() {
            return Err(Error::remote(format!(
                "accounts service error: HTTP {}",
                status.as_u16()
            )));
        }

        let accounts: Vec<ApiAccount> = response
            .json()
            .await
            .map_err(|e| Error::remote(format!("failed to parse accounts response: {}", e)))?;

        Ok(accounts
            .into_iter()
            .map(|a| Account::new(a.id, a.balance, a.account_number))
            .collect())
    }

    async fn submit_transfer(
        &self,
        credential: &Credential,
        transfer: &TransferRequest,
    ) -> Result<()> {
        let url = format!("{}/transactions/transfer", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential.token())
            .json(&TransferPayload {
                source_account_id: &transfer.source_account_id,
                target_account_id: &transfer.target_account_id,
                amount: transfer.amount,
            })
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if Self::is_auth_rejection(status) {
            return Err(Error::AuthExpired);
        }

        // The rejection body, when present, explains why (insufficient
        // funds, invalid destination, ...). It is opaque to this core.
        let body = response.text().await.unwrap_or_default();
        let message = body.trim();
        if message.is_empty() {
            Err(Error::remote(TRANSFER_FALLBACK_MESSAGE))
        } else {
            Err(Error::remote(message))
        }
    }
}
