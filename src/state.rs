use crate::chart::ChartRenderer;
use crate::models::Customer;
use crate::source::CustomerSource;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn CustomerSource>,
    pub chart: Arc<dyn ChartRenderer>,
    pub customer_id: String,
    pub customer: Arc<Mutex<Customer>>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn CustomerSource>,
        chart: Arc<dyn ChartRenderer>,
        customer_id: impl Into<String>,
    ) -> Self {
        Self {
            source,
            chart,
            customer_id: customer_id.into(),
            customer: Arc::new(Mutex::new(Customer::default())),
        }
    }

    /// Fetches the customer record. On failure the last good record is kept
    /// and returned.
    pub async fn refresh_customer(&self) -> Customer {
        match self.source.fetch_customer(&self.customer_id).await {
            Ok(customer) => {
                let mut cached = self.customer.lock().await;
                *cached = customer.clone();
                customer
            }
            Err(err) => {
                warn!(customer_id = %self.customer_id, "could not retrieve customer: {err}");
                self.customer.lock().await.clone()
            }
        }
    }
}
