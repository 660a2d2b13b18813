//! # Wire models for the credential backend
//!
//! The backend has shipped more than one response shape over time, so the
//! deserialization here is deliberately tolerant:
//!
//! - `/login` may return `{accessToken, user: {id}}` or the user id at the top
//!   level; ids may arrive as JSON numbers or strings.
//!   [`LoginResponse::into_credentials`] normalises both and returns `None`
//!   whenever no usable token *and* id pair is present — the caller maps that
//!   to a rejection, never a crash.
//! - List and item ids are likewise accepted as number or string and
//!   normalised to trimmed strings.
//!
//! Field names follow the wire format (`nome`, `comprado`, `listaId`) via
//! serde renames; the Rust side uses English names.

use serde::{Deserialize, Deserializer, Serialize};

/// A usable sign-in result: both fields verified non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub access_token: String,
    pub user_id: String,
}

/// Raw `/login` response body.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
    pub user: Option<UserRef>,
    /// Some backend versions return the id at the top level instead.
    pub id: Option<serde_json::Value>,
}

/// Nested user object inside a `/login` response.
#[derive(Debug, Deserialize)]
pub struct UserRef {
    pub id: serde_json::Value,
}

impl LoginResponse {
    /// Extract credentials, preferring the nested user id over the top-level
    /// one. Returns `None` if either the token or the id is missing or empty.
    pub fn into_credentials(self) -> Option<Credentials> {
        let access_token = self.access_token.filter(|t| !t.is_empty())?;
        let id = self
            .user
            .map(|u| u.id)
            .or(self.id)
            .map(|v| id_to_string(&v))?;
        if id.is_empty() {
            return None;
        }
        Some(Credentials {
            access_token,
            user_id: id,
        })
    }
}

/// Profile record from `GET /user/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// One shopping list from `GET /lists`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShoppingList {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    /// List category tag, e.g. `"MERCADO"`.
    #[serde(rename = "tipo")]
    pub kind: String,
}

/// One item from `GET /list-items/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "comprado", default)]
    pub done: bool,
    #[serde(rename = "listaId", default, deserialize_with = "de_opt_id")]
    pub list_id: Option<String>,
}

/// `GET /lists` sometimes wraps the array in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListsResponse {
    Plain(Vec<ShoppingList>),
    Wrapped { listas: Vec<ShoppingList> },
}

impl ListsResponse {
    pub fn into_lists(self) -> Vec<ShoppingList> {
        match self {
            ListsResponse::Plain(lists) => lists,
            ListsResponse::Wrapped { listas } => listas,
        }
    }
}

/// `GET /list-items/:id` sometimes wraps the array in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemsResponse {
    Plain(Vec<ShoppingItem>),
    Wrapped { items: Vec<ShoppingItem> },
}

impl ItemsResponse {
    pub fn into_items(self) -> Vec<ShoppingItem> {
        match self {
            ItemsResponse::Plain(items) => items,
            ItemsResponse::Wrapped { items } => items,
        }
    }
}

fn id_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(id_to_string(&value))
}

fn de_opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(|v| id_to_string(&v)).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_nested_user_shape() {
        let body: LoginResponse =
            serde_json::from_str(r#"{"accessToken":"abc","user":{"id":42}}"#).unwrap();
        let creds = body.into_credentials().unwrap();
        assert_eq!(creds.access_token, "abc");
        assert_eq!(creds.user_id, "42");
    }

    #[test]
    fn login_top_level_id_shape() {
        let body: LoginResponse =
            serde_json::from_str(r#"{"accessToken":"abc","id":"7 "}"#).unwrap();
        let creds = body.into_credentials().unwrap();
        assert_eq!(creds.user_id, "7");
    }

    #[test]
    fn login_without_token_is_unusable() {
        let body: LoginResponse = serde_json::from_str(r#"{"user":{"id":42}}"#).unwrap();
        assert!(body.into_credentials().is_none());

        let body: LoginResponse = serde_json::from_str(r#"{"accessToken":""}"#).unwrap();
        assert!(body.into_credentials().is_none());
    }

    #[test]
    fn login_without_id_is_unusable() {
        let body: LoginResponse = serde_json::from_str(r#"{"accessToken":"abc"}"#).unwrap();
        assert!(body.into_credentials().is_none());
    }

    #[test]
    fn item_wire_names() {
        let item: ShoppingItem =
            serde_json::from_str(r#"{"id":9,"nome":"Milk","comprado":true,"listaId":"3"}"#)
                .unwrap();
        assert_eq!(item.id, "9");
        assert_eq!(item.name, "Milk");
        assert!(item.done);
        assert_eq!(item.list_id.as_deref(), Some("3"));
    }

    #[test]
    fn lists_plain_and_wrapped() {
        let plain: ListsResponse =
            serde_json::from_str(r#"[{"id":1,"tipo":"MERCADO"}]"#).unwrap();
        assert_eq!(plain.into_lists().len(), 1);

        let wrapped: ListsResponse =
            serde_json::from_str(r#"{"listas":[{"id":"1","tipo":"MERCADO"}]}"#).unwrap();
        assert_eq!(wrapped.into_lists()[0].id, "1");
    }
}
