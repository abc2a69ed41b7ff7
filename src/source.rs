//! Where customer records come from.

use crate::account::{Credentials, CustomerRegistration};
use crate::models::Customer;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("customer api returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("customer {0} not found")]
    NotFound(String),
    #[error("email or password is incorrect")]
    InvalidCredentials,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid customer data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait CustomerSource: Send + Sync {
    async fn fetch_customer(&self, id: &str) -> Result<Customer, SourceError>;
    async fn create_customer(
        &self,
        registration: &CustomerRegistration,
    ) -> Result<Customer, SourceError>;
    /// Resolves credentials to the customer they belong to.
    async fn login(&self, credentials: &Credentials) -> Result<Customer, SourceError>;
}

/// Customer API reached over HTTP.
#[derive(Clone, Debug)]
pub struct HttpCustomerSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCustomerSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn handle_response(&self, resp: reqwest::Response) -> Result<Customer, SourceError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json::<Customer>().await?)
    }
}

#[async_trait]
impl CustomerSource for HttpCustomerSource {
    async fn fetch_customer(&self, id: &str) -> Result<Customer, SourceError> {
        let url = format!("{}/api/v1/customers/{}", self.base_url, id);
        let resp = self.client.get(&url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(id.to_string()));
        }
        self.handle_response(resp).await
    }

    async fn create_customer(
        &self,
        registration: &CustomerRegistration,
    ) -> Result<Customer, SourceError> {
        let url = format!("{}/api/v1/customers", self.base_url);
        let resp = self.client.post(&url).json(registration).send().await?;
        self.handle_response(resp).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<Customer, SourceError> {
        let url = format!("{}/api/v1/auth/login", self.base_url);
        let resp = self.client.post(&url).json(credentials).send().await?;
        if matches!(
            resp.status(),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN
        ) {
            return Err(SourceError::InvalidCredentials);
        }
        self.handle_response(resp).await
    }
}
