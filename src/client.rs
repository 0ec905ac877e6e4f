use eyre::{eyre, Result};
use reqwest::Response;

use crate::payloads::{AuthRequest, DepartmentRequest, Employee, UserUpdateRequest};

const BASE_URL: &str = "http://localhost:8888";

/// Thin wrapper around `reqwest::Client` for the service under test. Methods
/// return the raw response; deciding whether a status is good or bad is the
/// caller's job, since the scenarios assert on failures on purpose.
#[derive(Debug, Clone)]
pub struct Client {
    pub client: reqwest::Client,
    pub token: Option<String>,
    base_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: None,
            base_url: base_url.into(),
        }
    }

    pub async fn auth(&self, request: &AuthRequest) -> Result<Response> {
        let url = format!("{}/api/v1/auth", self.base_url);
        Ok(self.client.post(url).json(request).send().await?)
    }

    pub async fn ping(&self) -> Result<Response> {
        let url = format!("{}/ping", self.base_url);
        Ok(self.client.get(url).send().await?)
    }

    pub async fn update_user(&self, request: &UserUpdateRequest) -> Result<Response> {
        let url = format!("{}/api/v1/user", self.base_url);
        let response = self
            .client
            .patch(url)
            .header("Authorization", self.bearer()?)
            .json(request)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn get_users(&self) -> Result<Response> {
        let url = format!("{}/api/v1/user", self.base_url);
        let response = self
            .client
            .get(url)
            .header("Authorization", self.bearer()?)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn create_department(&self, request: &DepartmentRequest) -> Result<Response> {
        let url = format!("{}/api/v1/department", self.base_url);
        let response = self
            .client
            .post(url)
            .header("Authorization", self.bearer()?)
            .json(request)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn get_departments(&self) -> Result<Response> {
        let url = format!("{}/api/v1/department", self.base_url);
        let response = self
            .client
            .get(url)
            .header("Authorization", self.bearer()?)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn update_department(
        &self,
        department_id: &str,
        request: &DepartmentRequest,
    ) -> Result<Response> {
        let url = format!("{}/api/v1/department/{}", self.base_url, department_id);
        let response = self
            .client
            .patch(url)
            .header("Authorization", self.bearer()?)
            .json(request)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn delete_department(&self, department_id: &str) -> Result<Response> {
        let url = format!("{}/api/v1/department/{}", self.base_url, department_id);
        let response = self
            .client
            .delete(url)
            .header("Authorization", self.bearer()?)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn create_employee(&self, request: &Employee) -> Result<Response> {
        let url = format!("{}/api/v1/employee", self.base_url);
        let response = self
            .client
            .post(url)
            .header("Authorization", self.bearer()?)
            .json(request)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn get_employees(&self) -> Result<Response> {
        let url = format!("{}/api/v1/employee", self.base_url);
        let response = self
            .client
            .get(url)
            .header("Authorization", self.bearer()?)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn update_employee(&self, identity_number: &str, request: &Employee) -> Result<Response> {
        let url = format!("{}/api/v1/employee/{}", self.base_url, identity_number);
        let response = self
            .client
            .patch(url)
            .header("Authorization", self.bearer()?)
            .json(request)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn delete_employee(&self, identity_number: &str) -> Result<Response> {
        let url = format!("{}/api/v1/employee/{}", self.base_url, identity_number);
        let response = self
            .client
            .delete(url)
            .header("Authorization", self.bearer()?)
            .send()
            .await?;
        Ok(response)
    }

    fn bearer(&self) -> Result<String> {
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| eyre!("not logged in, no session token"))?;
        Ok(format!("Bearer {}", token))
    }
}
