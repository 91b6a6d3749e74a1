use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User profile as returned by the backend on login.
///
/// Every field the backend may or may not send is an explicit `Option`; the
/// shape is resolved once here instead of being re-guessed at each consumption
/// site. Unmodeled fields are kept in `extra` so a profile survives a storage
/// round-trip byte-for-byte in meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome_completo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loja_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome_loja: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perfil_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: None,
            nome: None,
            nome_completo: None,
            email: None,
            loja_id: None,
            nome_loja: None,
            perfil_id: None,
            extra: Map::new(),
        }
    }
}

/// Store ("loja") record from the directory lookup endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StoreRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub nome_fantasia: Option<String>,
}

/// Employee ("funcionario") record from the directory lookup endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EmployeeRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nome_loja: Option<String>,
    #[serde(default)]
    pub loja_id: Option<i64>,
}

/// Parsed result of a successful login call.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginPayload {
    pub token: String,
    pub user: UserProfile,
}

impl LoginPayload {
    /// Parse a login response body.
    ///
    /// The backend returns `{token, user}` either at the top level or nested
    /// under `data`. A response missing either field is a login failure even
    /// when the HTTP status was a success.
    pub fn from_response(body: &Value) -> Result<Self, crate::error::ClientError> {
        let root = body.get("data").filter(|d| d.is_object()).unwrap_or(body);

        let token = root
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty());

        let user = root
            .get("user")
            .filter(|u| u.is_object())
            .cloned()
            .map(serde_json::from_value::<UserProfile>);

        match (token, user) {
            (Some(token), Some(Ok(user))) => Ok(Self {
                token: token.to_string(),
                user,
            }),
            (_, Some(Err(e))) => Err(crate::error::ClientError::MalformedResponse(format!(
                "login response user payload: {}",
                e
            ))),
            _ => Err(crate::error::ClientError::MalformedResponse(
                "login response missing token or user".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_payload_parses_flat_response() {
        let body = json!({ "token": "abc", "user": { "id": 1, "email": "a@b.com" } });
        let payload = LoginPayload::from_response(&body).unwrap();
        assert_eq!(payload.token, "abc");
        assert_eq!(payload.user.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn login_payload_parses_data_nested_response() {
        let body = json!({
            "success": true,
            "data": { "token": "abc", "user": { "id": 2 } }
        });
        let payload = LoginPayload::from_response(&body).unwrap();
        assert_eq!(payload.token, "abc");
        assert_eq!(payload.user.id, Some(2));
    }

    #[test]
    fn login_payload_rejects_missing_token() {
        let body = json!({ "user": { "id": 1 } });
        assert!(LoginPayload::from_response(&body).is_err());
    }

    #[test]
    fn login_payload_rejects_missing_user() {
        let body = json!({ "token": "abc" });
        assert!(LoginPayload::from_response(&body).is_err());
    }

    #[test]
    fn login_payload_rejects_empty_token() {
        let body = json!({ "token": "", "user": { "id": 1 } });
        assert!(LoginPayload::from_response(&body).is_err());
    }

    #[test]
    fn user_profile_round_trips_unknown_fields() {
        let raw = json!({
            "id": 9,
            "email": "a@b.com",
            "telefone": "+55 11 0000-0000",
            "ativo": true
        });
        let profile: UserProfile = serde_json::from_value(raw.clone()).unwrap();
        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back, raw);
    }
}
