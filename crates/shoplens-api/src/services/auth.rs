//! Authentication and account flows.

use serde_json::{json, Value};

use shoplens_core::types::{DashboardStats, UserProfile};

use crate::endpoints;
use crate::error::ApiError;
use crate::normalize::{date_field, str_field, u64_field};
use crate::services::Backend;

/// Signup form as collected by the UI. Validated locally before any
/// network call.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
    pub site_name: String,
    pub site_type: String,
    pub site_url: String,
    pub business_category: String,
    pub terms_accepted: bool,
}

impl SignupForm {
    /// # Errors
    /// Returns [`ApiError::Validation`] naming the first failing field.
    pub fn validate(&self) -> Result<(), ApiError> {
        let required: &[(&str, &str)] = &[
            (&self.email, "이메일을 입력해주세요."),
            (&self.password, "비밀번호를 입력해주세요."),
            (&self.first_name, "이름을 입력해주세요."),
            (&self.last_name, "성을 입력해주세요."),
            (&self.site_name, "쇼핑몰 이름을 입력해주세요."),
        ];
        for (value, message) in required {
            if value.trim().is_empty() {
                return Err(ApiError::Validation((*message).to_owned()));
            }
        }
        if self.password != self.password_confirm {
            return Err(ApiError::Validation(
                "비밀번호가 일치하지 않습니다.".to_owned(),
            ));
        }
        if !self.terms_accepted {
            return Err(ApiError::Validation(
                "이용약관에 동의해주세요.".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Logs in and populates the session: exchange credentials for tokens,
/// fetch the profile with them, then commit user and tokens together.
///
/// # Errors
///
/// [`ApiError::Validation`] for empty credentials, [`ApiError::Status`] for
/// rejected credentials, plus the usual transport errors.
pub async fn login(backend: &Backend, email: &str, password: &str) -> Result<UserProfile, ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "이메일과 비밀번호를 입력해주세요.".to_owned(),
        ));
    }

    match backend {
        Backend::Mock { data, session } => {
            let user = data.profile();
            session.set_authenticated(
                user.clone(),
                "mock-access-token".to_owned(),
                "mock-refresh-token".to_owned(),
            )?;
            tracing::info!(email, "mock login");
            Ok(user)
        }
        Backend::Api(client) => {
            let body = json!({ "email": email, "password": password });
            let response = client.post(endpoints::AUTH_LOGIN, body).await?;
            let (access, refresh) = extract_tokens(&response)?;

            // The profile fetch needs the bearer token, so rotate first;
            // the full snapshot is committed once the user is known.
            client.session().rotate_tokens(access.clone(), refresh.clone())?;
            let profile_value = client.get(endpoints::PROFILE).await?;
            let user = parse_profile(&profile_value)?;

            client
                .session()
                .set_authenticated(user.clone(), access, refresh)?;
            tracing::info!(email, "login complete");
            Ok(user)
        }
    }
}

/// Registers a new account, then logs it in.
///
/// # Errors
/// [`ApiError::Validation`] before any network call when the form is
/// incomplete; otherwise the same failure modes as [`login`].
pub async fn signup(backend: &Backend, form: &SignupForm) -> Result<UserProfile, ApiError> {
    form.validate()?;

    if let Backend::Api(client) = backend {
        let body = json!({
            "email": form.email,
            "password": form.password,
            "first_name": form.first_name,
            "last_name": form.last_name,
            "site_name": form.site_name,
            "site_type": form.site_type,
            "site_url": form.site_url,
            "business_category": form.business_category,
        });
        client.post(endpoints::AUTH_REGISTER, body).await?;
    }

    login(backend, &form.email, &form.password).await
}

/// Logs out: tells the server to invalidate the refresh token, then clears
/// the local session. The server call is best-effort — the local session is
/// cleared even when it fails.
///
/// # Errors
/// [`ApiError::SessionStorage`] if removing the persisted snapshot fails.
pub async fn logout(backend: &Backend) -> Result<(), ApiError> {
    if let Backend::Api(client) = backend {
        let refresh_token = client.session().refresh_token();
        let body = json!({ "refresh_token": refresh_token });
        if let Err(error) = client.post(endpoints::AUTH_LOGOUT, body).await {
            tracing::warn!(%error, "server-side logout failed, clearing local session anyway");
        }
    }
    backend.session().clear()?;
    tracing::info!("logged out");
    Ok(())
}

/// Forces a token rotation outside the automatic 401 cycle.
///
/// # Errors
/// [`ApiError::Unauthorized`] when there is no session to refresh or the
/// server rejects the stored refresh token.
pub async fn refresh(backend: &Backend) -> Result<(), ApiError> {
    match backend {
        Backend::Mock { session, .. } => {
            if !session.is_authenticated() {
                return Err(ApiError::Unauthorized);
            }
            session.rotate_tokens(
                "mock-access-token".to_owned(),
                "mock-refresh-token".to_owned(),
            )?;
            Ok(())
        }
        Backend::Api(client) => client.refresh().await,
    }
}

/// Fetches the authenticated user's profile.
///
/// # Errors
/// Transport and status errors from the profile endpoint.
pub async fn current_user(backend: &Backend) -> Result<UserProfile, ApiError> {
    match backend {
        Backend::Mock { data, .. } => Ok(data.profile()),
        Backend::Api(client) => {
            let value = client.get(endpoints::PROFILE).await?;
            parse_profile(&value)
        }
    }
}

/// Fetches the headline dashboard counters.
///
/// # Errors
/// Transport and status errors from the stats endpoint.
pub async fn dashboard_stats(backend: &Backend) -> Result<DashboardStats, ApiError> {
    match backend {
        Backend::Mock { data, .. } => Ok(data.dashboard_stats()),
        Backend::Api(client) => {
            let value = client.get(endpoints::DASHBOARD_STATS).await?;
            let obj = value.get("data").unwrap_or(&value);
            Ok(DashboardStats {
                total_products: u64_field(obj, &["total_products", "product_count"]).unwrap_or(0),
                total_customers: u64_field(obj, &["total_customers", "customer_count"])
                    .unwrap_or(0),
                monthly_revenue: u64_field(obj, &["monthly_revenue", "monthly_sales"]).unwrap_or(0),
            })
        }
    }
}

fn extract_tokens(value: &Value) -> Result<(String, String), ApiError> {
    let access = str_field(value, &["access_token"]);
    let refresh = str_field(value, &["refresh_token"]);
    match (access, refresh) {
        (Some(access), Some(refresh)) => Ok((access, refresh)),
        _ => Err(ApiError::Deserialize {
            context: "login response tokens".to_owned(),
            source: serde::de::Error::custom("missing access_token or refresh_token"),
        }),
    }
}

fn parse_profile(value: &Value) -> Result<UserProfile, ApiError> {
    let obj = value.get("user").or_else(|| value.get("data")).unwrap_or(value);
    let id = str_field(obj, &["user_id", "id"]).ok_or_else(|| ApiError::Deserialize {
        context: "profile response".to_owned(),
        source: serde::de::Error::custom("missing user id"),
    })?;
    Ok(UserProfile {
        id,
        email: str_field(obj, &["email"]).unwrap_or_default(),
        first_name: str_field(obj, &["first_name"]).unwrap_or_default(),
        last_name: str_field(obj, &["last_name"]).unwrap_or_default(),
        site_name: str_field(obj, &["site_name", "shop_name"]).unwrap_or_default(),
        site_type: str_field(obj, &["site_type", "platform"]).unwrap_or_default(),
        site_url: str_field(obj, &["site_url", "shop_url"]).unwrap_or_default(),
        timezone: str_field(obj, &["timezone"]).unwrap_or_default(),
        business_category: str_field(obj, &["business_category", "category"]).unwrap_or_default(),
        created_at: date_field(obj, &["created_at"])
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signup_form_requires_fields_in_order() {
        let form = SignupForm::default();
        match form.validate() {
            Err(ApiError::Validation(msg)) => assert!(msg.contains("이메일")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn signup_form_checks_password_confirmation() {
        let form = SignupForm {
            email: "a@b.c".into(),
            password: "pw1".into(),
            password_confirm: "pw2".into(),
            first_name: "수진".into(),
            last_name: "박".into(),
            site_name: "몰".into(),
            terms_accepted: true,
            ..SignupForm::default()
        };
        match form.validate() {
            Err(ApiError::Validation(msg)) => assert!(msg.contains("비밀번호")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn signup_form_requires_terms() {
        let form = SignupForm {
            email: "a@b.c".into(),
            password: "pw".into(),
            password_confirm: "pw".into(),
            first_name: "수진".into(),
            last_name: "박".into(),
            site_name: "몰".into(),
            terms_accepted: false,
            ..SignupForm::default()
        };
        match form.validate() {
            Err(ApiError::Validation(msg)) => assert!(msg.contains("약관")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn profile_parses_nested_and_flat_shapes() {
        let nested = json!({"user": {"id": 9, "email": "o@e.com", "site_name": "몰"}});
        let profile = parse_profile(&nested).unwrap();
        assert_eq!(profile.id, "9");
        assert_eq!(profile.site_name, "몰");

        let flat = json!({"user_id": "u-1", "shop_name": "가게"});
        let profile = parse_profile(&flat).unwrap();
        assert_eq!(profile.id, "u-1");
        assert_eq!(profile.site_name, "가게");
    }

    #[test]
    fn token_extraction_rejects_partial_pairs() {
        assert!(extract_tokens(&json!({"access_token": "a", "refresh_token": "r"})).is_ok());
        assert!(extract_tokens(&json!({"access_token": "a"})).is_err());
        assert!(extract_tokens(&json!({})).is_err());
    }

    #[tokio::test]
    async fn mock_login_rejects_empty_credentials() {
        let backend = Backend::Mock {
            data: crate::mock::MockData::new(),
            session: crate::session::SessionStore::in_memory(),
        };
        assert!(matches!(
            login(&backend, "", "").await,
            Err(ApiError::Validation(_))
        ));
        assert!(!backend.session().is_authenticated());
    }

    #[tokio::test]
    async fn mock_login_and_logout_round_trip() {
        let backend = Backend::Mock {
            data: crate::mock::MockData::new(),
            session: crate::session::SessionStore::in_memory(),
        };
        let user = login(&backend, "owner@shoplens.example", "pw").await.unwrap();
        assert!(!user.id.is_empty());
        assert!(backend.session().is_authenticated());

        logout(&backend).await.unwrap();
        assert!(!backend.session().is_authenticated());
    }
}
