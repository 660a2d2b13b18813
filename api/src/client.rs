//! # BackendClient — one method per backend endpoint
//!
//! A thin wrapper around a shared [`reqwest::Client`]. Every method maps a
//! non-success HTTP status to [`ApiError::Status`] before attempting to decode
//! a body, and `login` maps an unusable response body to [`ApiError::Rejected`]
//! rather than panicking on missing fields.

use serde_json::json;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{
    Credentials, ItemsResponse, ListsResponse, LoginResponse, ShoppingItem, ShoppingList,
    UserRecord,
};

/// HTTP client for the Hearth credential backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url,
        }
    }

    /// Client configured from `HEARTH_API_URL` (or the hosted default).
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(ApiError::Status(resp.status().as_u16()))
        }
    }

    /// `POST /login` — exchange email + password for a bearer token and user id.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credentials, ApiError> {
        let resp = self
            .http
            .post(self.url("/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body: LoginResponse = Self::check(resp).await?.json().await?;
        body.into_credentials().ok_or(ApiError::Rejected)
    }

    /// `GET /user/:id` — profile fields for the signed-in backend user.
    pub async fn fetch_user(&self, user_id: &str, token: &str) -> Result<UserRecord, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/user/{user_id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// `PUT /update-user/:id` — update name and email.
    pub async fn update_user(
        &self,
        user_id: &str,
        token: &str,
        name: &str,
        email: &str,
    ) -> Result<(), ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("/update-user/{user_id}")))
            .bearer_auth(token)
            .json(&json!({ "name": name, "email": email }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// `PUT /update-user/:id/password` — change the account password.
    pub async fn change_password(
        &self,
        user_id: &str,
        token: &str,
        current: &str,
        new: &str,
    ) -> Result<(), ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("/update-user/{user_id}/password")))
            .bearer_auth(token)
            .json(&json!({ "currentPassword": current, "password": new }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// `GET /lists` — every list visible to the token's user.
    pub async fn lists(&self, token: &str) -> Result<Vec<ShoppingList>, ApiError> {
        let resp = self
            .http
            .get(self.url("/lists"))
            .bearer_auth(token)
            .send()
            .await?;
        let body: ListsResponse = Self::check(resp).await?.json().await?;
        Ok(body.into_lists())
    }

    /// `GET /list-items/:id` — items of one list. A non-success status also
    /// serves as an ownership check: the backend answers 401/403/404 for lists
    /// that do not belong to the token's user.
    pub async fn list_items(
        &self,
        list_id: &str,
        token: &str,
    ) -> Result<Vec<ShoppingItem>, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/list-items/{list_id}")))
            .bearer_auth(token)
            .send()
            .await?;
        let body: ItemsResponse = Self::check(resp).await?.json().await?;
        Ok(body.into_items())
    }

    /// `POST /create-list` — create a list of the given kind, returning its id.
    /// The id has appeared under several envelope shapes across backend
    /// versions; all are probed before giving up.
    pub async fn create_list(&self, kind: &str, token: &str) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(self.url("/create-list"))
            .bearer_auth(token)
            .json(&json!({ "tipo": kind }))
            .send()
            .await?;
        let body: serde_json::Value = Self::check(resp).await?.json().await?;
        created_list_id(&body).ok_or(ApiError::Rejected)
    }

    /// `POST /add-item-to-list` — append an item to a list.
    pub async fn add_item(
        &self,
        list_id: &str,
        name: &str,
        token: &str,
    ) -> Result<ShoppingItem, ApiError> {
        let resp = self
            .http
            .post(self.url("/add-item-to-list"))
            .bearer_auth(token)
            .json(&json!({ "listaId": list_id, "nome": name }))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// `PUT /list-items/:id` — toggle an item's done flag.
    pub async fn set_item_done(
        &self,
        item_id: &str,
        done: bool,
        token: &str,
    ) -> Result<(), ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("/list-items/{item_id}")))
            .bearer_auth(token)
            .json(&json!({ "comprado": done }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}

fn created_list_id(body: &serde_json::Value) -> Option<String> {
    let candidate = body
        .get("id")
        .or_else(|| body.get("lista").and_then(|v| v.get("id")))
        .or_else(|| body.get("data").and_then(|v| v.get("id")))
        .or_else(|| body.get("result").and_then(|v| v.get("id")))?;
    let id = match candidate {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_list_id_probes_envelopes() {
        let shapes = [
            r#"{"id":5}"#,
            r#"{"lista":{"id":"5"}}"#,
            r#"{"data":{"id":5}}"#,
            r#"{"result":{"id":" 5 "}}"#,
        ];
        for shape in shapes {
            let body: serde_json::Value = serde_json::from_str(shape).unwrap();
            assert_eq!(created_list_id(&body).as_deref(), Some("5"), "{shape}");
        }

        let body: serde_json::Value = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert_eq!(created_list_id(&body), None);
    }

    #[test]
    fn url_join() {
        let client = BackendClient::new(ApiConfig::with_base_url("http://localhost:3000/"));
        assert_eq!(client.url("/login"), "http://localhost:3000/login");
    }
}
