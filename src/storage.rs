use crate::account::{Credentials, CustomerRegistration};
use crate::models::Customer;
use crate::source::{CustomerSource, SourceError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{error, info};

/// A customer record as kept on disk, with the login digest alongside.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoredCustomer {
    #[serde(flatten)]
    pub customer: Customer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_digest: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerStore {
    #[serde(default)]
    pub customers: Vec<StoredCustomer>,
}

impl CustomerStore {
    fn find(&self, id: &str) -> Option<&Customer> {
        self.customers
            .iter()
            .map(|stored| &stored.customer)
            .find(|customer| customer.id.is_some_and(|known| known.to_string() == id))
    }

    fn find_by_email(&self, email: &str) -> Option<&StoredCustomer> {
        self.customers.iter().find(|stored| {
            stored
                .customer
                .email
                .as_deref()
                .is_some_and(|known| known.eq_ignore_ascii_case(email))
        })
    }

    fn next_id(&self) -> i64 {
        self.customers
            .iter()
            .filter_map(|stored| stored.customer.id)
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Customer records kept in a local JSON file shaped like the customer API's
/// responses. Used when no API URL is configured.
pub struct FileCustomerSource {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCustomerSource {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CustomerSource for FileCustomerSource {
    async fn fetch_customer(&self, id: &str) -> Result<Customer, SourceError> {
        let store = {
            let _guard = self.lock.lock().await;
            load_store(&self.path).await?
        };
        store
            .find(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }

    async fn create_customer(
        &self,
        registration: &CustomerRegistration,
    ) -> Result<Customer, SourceError> {
        let _guard = self.lock.lock().await;
        let mut store = load_store(&self.path).await?;
        let customer = Customer {
            id: Some(store.next_id()),
            name: registration.name.clone(),
            email: Some(registration.email.clone()),
            age: Some(registration.age),
            gender: Some(registration.gender.as_str().to_string()),
            workouts: Vec::new(),
        };
        store.customers.push(StoredCustomer {
            customer: customer.clone(),
            password_digest: Some(password_digest(&registration.email, &registration.password)),
        });
        persist_store(&self.path, &store).await?;
        info!(id = ?customer.id, "registered customer");
        Ok(customer)
    }

    async fn login(&self, credentials: &Credentials) -> Result<Customer, SourceError> {
        let store = {
            let _guard = self.lock.lock().await;
            load_store(&self.path).await?
        };
        let expected = password_digest(&credentials.email, &credentials.password);
        store
            .find_by_email(&credentials.email)
            .filter(|stored| stored.password_digest.as_deref() == Some(expected.as_str()))
            .map(|stored| stored.customer.clone())
            .ok_or(SourceError::InvalidCredentials)
    }
}

/// Hex SHA-256 of the lowercased email and password.
fn password_digest(email: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.to_ascii_lowercase().as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Reads the store; a missing file is an empty store.
pub async fn load_store(path: &Path) -> Result<CustomerStore, SourceError> {
    match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
            error!("failed to parse data file {}: {err}", path.display());
            SourceError::from(err)
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(CustomerStore::default()),
        Err(err) => {
            error!("failed to read data file {}: {err}", path.display());
            Err(err.into())
        }
    }
}

/// Writes next to the target and renames over it, so readers never see a
/// half-written file.
pub async fn persist_store(path: &Path, store: &CustomerStore) -> Result<(), SourceError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(store)?;
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);
    fs::write(&staging, payload).await?;
    fs::rename(&staging, path).await?;
    Ok(())
}
