use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    ActionResponse, AlertsResponse, ApiError, DashboardConfig, DashboardData, MonthYear,
    TransactionDetail, TransactionForm, TransactionLookupResponse,
};
use web_sys::FormData;

/// API client for the dashboard backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Same-origin client
    pub fn new() -> Self {
        Self::with_base_url(String::new())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Summary, table, chart and calendar data for one month
    pub async fn get_dashboard_data(&self, period: MonthYear) -> Result<DashboardData, ApiError> {
        let response = Request::get(&self.url("/dashboard/dashboard_data"))
            .query([
                ("month", period.month.to_string()),
                ("year", period.year.to_string()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    pub async fn add_transaction(&self, form: &TransactionForm) -> Result<ActionResponse, ApiError> {
        self.post_form("/transactions/add", form).await
    }

    pub async fn edit_transaction(
        &self,
        id: i64,
        form: &TransactionForm,
    ) -> Result<ActionResponse, ApiError> {
        self.post_form(&format!("/transactions/edit/{}", id), form).await
    }

    /// Load one transaction for the edit modal
    pub async fn get_transaction(&self, id: i64) -> Result<TransactionDetail, ApiError> {
        let response = Request::get(&self.url(&format!("/transactions/get/{}", id)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let ok = response.ok();
        let lookup = response.json::<TransactionLookupResponse>().await;

        match lookup {
            Ok(TransactionLookupResponse {
                success: true,
                transaction: Some(transaction),
                ..
            }) => Ok(transaction),
            Ok(lookup) if ok => Err(ApiError::Rejected(lookup.message.unwrap_or_default())),
            Ok(lookup) => Err(ApiError::Status {
                status,
                message: lookup.message,
            }),
            Err(_) if !ok => Err(ApiError::Status {
                status,
                message: None,
            }),
            Err(e) => Err(ApiError::Decode(e.to_string())),
        }
    }

    pub async fn delete_transaction(&self, id: i64) -> Result<ActionResponse, ApiError> {
        self.post_empty_json(&format!("/transactions/delete/{}", id)).await
    }

    pub async fn mark_paid(&self, id: i64) -> Result<ActionResponse, ApiError> {
        self.post_empty_json(&format!("/transactions/pay/{}", id)).await
    }

    /// Expenses coming due in the next few days
    pub async fn check_alerts(&self) -> Result<AlertsResponse, ApiError> {
        let response = Request::get(&self.url("/alerts/check"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    pub async fn dismiss_alert(&self, id: i64) -> Result<ActionResponse, ApiError> {
        self.post_empty_json(&format!("/alerts/dismiss/{}", id)).await
    }

    async fn post_form(&self, path: &str, form: &TransactionForm) -> Result<ActionResponse, ApiError> {
        let body = FormData::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
        for (name, value) in form.to_form_pairs() {
            body.append_with_str(name, &value)
                .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
        }

        let response = Request::post(&self.url(path))
            .body(body)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::read_action(response).await
    }

    async fn post_empty_json(&self, path: &str) -> Result<ActionResponse, ApiError> {
        let response = Request::post(&self.url(path))
            .json(&serde_json::json!({}))
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::read_action(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            return Err(ApiError::Status {
                status: response.status(),
                message: None,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// The backend sends `{success, message}` with error statuses too, so the
    /// body is read before the status decides anything.
    async fn read_action(response: Response) -> Result<ActionResponse, ApiError> {
        let status = response.status();
        let ok = response.ok();

        match response.json::<ActionResponse>().await {
            Ok(action) if action.success => Ok(action),
            Ok(action) if ok => Err(ApiError::Rejected(action.message.unwrap_or_default())),
            Ok(action) => Err(ApiError::Status {
                status,
                message: action.message,
            }),
            Err(_) if !ok => Err(ApiError::Status {
                status,
                message: None,
            }),
            Err(e) => Err(ApiError::Decode(e.to_string())),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
