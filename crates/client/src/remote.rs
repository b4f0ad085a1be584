//! Remote access layer: one stateless function per backend operation.
//!
//! Every call is exactly one round trip. There are no retries, no timeout
//! override and no response caching.

use std::future::Future;

use api_types::{
    AccountId, BudgetId, CategoryId, ErrorBody, TransactionId, UserId,
    account::{Account, AccountNew},
    budget::{Budget, BudgetNew},
    category::{Category, CategoryNew},
    dashboard::{BudgetSummary, CategoryTotal, MonthTotal, Summary},
    transaction::{Transaction, TransactionNew},
    user::{Login, SignupNew, User},
};
use reqwest::{Method, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ClientError, Result};

/// The backend operations the client relies on.
///
/// The backend scopes every list to `user_id`; nothing is filtered locally.
pub trait Backend: Send + Sync {
    fn signup(&self, payload: &SignupNew) -> impl Future<Output = Result<User>> + Send;
    fn login(&self, payload: &Login) -> impl Future<Output = Result<User>> + Send;

    fn list_accounts(&self, user_id: UserId) -> impl Future<Output = Result<Vec<Account>>> + Send;
    fn create_account(&self, payload: &AccountNew) -> impl Future<Output = Result<Account>> + Send;
    fn delete_account(&self, id: AccountId) -> impl Future<Output = Result<()>> + Send;

    fn list_categories(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Category>>> + Send;
    fn create_category(
        &self,
        payload: &CategoryNew,
    ) -> impl Future<Output = Result<Category>> + Send;
    fn delete_category(&self, id: CategoryId) -> impl Future<Output = Result<()>> + Send;

    fn list_budgets(&self, user_id: UserId) -> impl Future<Output = Result<Vec<Budget>>> + Send;
    fn create_budget(&self, payload: &BudgetNew) -> impl Future<Output = Result<Budget>> + Send;
    fn delete_budget(&self, id: BudgetId) -> impl Future<Output = Result<()>> + Send;

    fn list_transactions(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Transaction>>> + Send;
    fn create_transaction(
        &self,
        payload: &TransactionNew,
    ) -> impl Future<Output = Result<Transaction>> + Send;
    fn delete_transaction(&self, id: TransactionId) -> impl Future<Output = Result<()>> + Send;

    fn dashboard_summary(&self, user_id: UserId) -> impl Future<Output = Result<Summary>> + Send;
    fn dashboard_by_category(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<CategoryTotal>>> + Send;
    fn dashboard_by_month(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<MonthTotal>>> + Send;
    fn dashboard_budget_summary(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<BudgetSummary>>> + Send;
}

#[derive(Debug, Serialize)]
struct UserQuery {
    user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

impl UserQuery {
    fn user(user_id: UserId) -> Self {
        Self {
            user_id,
            limit: None,
        }
    }
}

/// [`Backend`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!("{base_url} cannot be a base")));
        }
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|err| ClientError::InvalidUrl(err.to_string()))
    }

    async fn get_json<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.http.get(self.url(path)?).query(query).send().await?;
        log_response(Method::GET, path, &res);
        read_json(res).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.http.post(self.url(path)?).json(body).send().await?;
        log_response(Method::POST, path, &res);
        read_json(res).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let res = self.http.delete(self.url(path)?).send().await?;
        log_response(Method::DELETE, path, &res);
        if res.status().is_success() {
            return Ok(());
        }
        Err(error_from(res).await)
    }
}

fn log_response(method: Method, path: &str, res: &reqwest::Response) {
    tracing::debug!(%method, path, status = res.status().as_u16(), "backend call");
}

async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T> {
    if !res.status().is_success() {
        return Err(error_from(res).await);
    }
    let body = res.bytes().await?;
    serde_json::from_slice(&body).map_err(|err| ClientError::Decode(err.to_string()))
}

async fn error_from(res: reqwest::Response) -> ClientError {
    let status = res.status().as_u16();
    let message = res
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::message);
    ClientError::from_status(status, message)
}

impl Backend for HttpBackend {
    async fn signup(&self, payload: &SignupNew) -> Result<User> {
        self.post_json("/auth/signup", payload).await
    }

    async fn login(&self, payload: &Login) -> Result<User> {
        self.post_json("/auth/login", payload).await
    }

    async fn list_accounts(&self, user_id: UserId) -> Result<Vec<Account>> {
        self.get_json("/accounts", &UserQuery::user(user_id)).await
    }

    async fn create_account(&self, payload: &AccountNew) -> Result<Account> {
        self.post_json("/accounts", payload).await
    }

    async fn delete_account(&self, id: AccountId) -> Result<()> {
        self.delete(&format!("/accounts/{id}")).await
    }

    async fn list_categories(&self, user_id: UserId) -> Result<Vec<Category>> {
        self.get_json("/categories", &UserQuery::user(user_id)).await
    }

    async fn create_category(&self, payload: &CategoryNew) -> Result<Category> {
        self.post_json("/categories", payload).await
    }

    async fn delete_category(&self, id: CategoryId) -> Result<()> {
        self.delete(&format!("/categories/{id}")).await
    }

    async fn list_budgets(&self, user_id: UserId) -> Result<Vec<Budget>> {
        self.get_json("/budgets", &UserQuery::user(user_id)).await
    }

    async fn create_budget(&self, payload: &BudgetNew) -> Result<Budget> {
        self.post_json("/budgets", payload).await
    }

    async fn delete_budget(&self, id: BudgetId) -> Result<()> {
        self.delete(&format!("/budgets/{id}")).await
    }

    async fn list_transactions(&self, user_id: UserId, limit: u32) -> Result<Vec<Transaction>> {
        let query = UserQuery {
            user_id,
            limit: Some(limit),
        };
        self.get_json("/transactions", &query).await
    }

    async fn create_transaction(&self, payload: &TransactionNew) -> Result<Transaction> {
        self.post_json("/transactions", payload).await
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<()> {
        self.delete(&format!("/transactions/{id}")).await
    }

    async fn dashboard_summary(&self, user_id: UserId) -> Result<Summary> {
        self.get_json("/dashboard/summary", &UserQuery::user(user_id))
            .await
    }

    async fn dashboard_by_category(&self, user_id: UserId) -> Result<Vec<CategoryTotal>> {
        self.get_json("/dashboard/by-category", &UserQuery::user(user_id))
            .await
    }

    async fn dashboard_by_month(&self, user_id: UserId) -> Result<Vec<MonthTotal>> {
        self.get_json("/dashboard/by-month", &UserQuery::user(user_id))
            .await
    }

    async fn dashboard_budget_summary(&self, user_id: UserId) -> Result<Vec<BudgetSummary>> {
        self.get_json("/dashboard/budget-summary", &UserQuery::user(user_id))
            .await
    }
}
