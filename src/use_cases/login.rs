use crate::domain::{ApiRequest, ApiTransport, SessionToken};
use crate::interface_adapters::protocol::{DetailResponse, LoginRequest, LoginResponse};
use crate::use_cases::auth_gate::SessionContext;
use crate::use_cases::register::api_path;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    Editing,
    Submitting,
    LoggedIn { greeting: String },
    Rejected { message: String },
    Failed { reason: String },
}

// Login form with injected session; a successful login stores the token there.
pub struct LoginForm {
    url: String,
    email: String,
    password: String,
    state: LoginState,
    session: SessionContext,
}

impl LoginForm {
    pub fn new(url: impl Into<String>, session: SessionContext) -> Self {
        Self {
            url: url.into(),
            email: String::new(),
            password: String::new(),
            state: LoginState::Editing,
            session,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn endpoint(&self) -> String {
        api_path(&self.url)
    }

    #[tracing::instrument(name = "login_submit", skip_all, fields(endpoint = %self.endpoint()))]
    pub async fn submit(&mut self, transport: &dyn ApiTransport) -> &LoginState {
        self.state = LoginState::Submitting;

        let body = match serde_json::to_value(LoginRequest {
            email: &self.email,
            password: &self.password,
        }) {
            Ok(body) => body,
            Err(err) => {
                self.state = LoginState::Failed {
                    reason: err.to_string(),
                };
                return &self.state;
            }
        };

        let response = match transport
            .send(ApiRequest::post_json(self.endpoint(), body))
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "login request failed.");
                self.state = LoginState::Failed {
                    reason: err.to_string(),
                };
                return &self.state;
            }
        };

        self.state = if response.is_success() {
            match serde_json::from_value::<LoginResponse>(response.body) {
                Ok(login) => self.accept(login),
                Err(err) => LoginState::Failed {
                    reason: format!("login response decode error: {err}"),
                },
            }
        } else if response.is_client_error() {
            let message = serde_json::from_value::<DetailResponse>(response.body)
                .ok()
                .and_then(DetailResponse::text)
                .unwrap_or_else(|| INVALID_CREDENTIALS.to_string());
            tracing::info!(status = response.status, "login rejected.");
            LoginState::Rejected { message }
        } else {
            tracing::error!(status = response.status, "login failed upstream.");
            LoginState::Failed {
                reason: format!("unexpected {} response", response.status),
            }
        };

        &self.state
    }

    fn accept(&self, login: LoginResponse) -> LoginState {
        let Some(token) = SessionToken::parse(login.token) else {
            return LoginState::Failed {
                reason: "login response carried an empty token".to_string(),
            };
        };

        self.session.store_token(token);
        tracing::info!("session token stored.");

        LoginState::LoggedIn {
            greeting: login.detail.or(login.message).unwrap_or_default(),
        }
    }

    pub fn logout(&mut self) -> bool {
        self.state = LoginState::Editing;
        self.session.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransportError;
    use crate::use_cases::test_support::ScriptedTransport;
    use serde_json::json;

    fn form(session: &SessionContext) -> LoginForm {
        let mut form = LoginForm::new("/login", session.clone());
        form.set_email("amanda@example.com");
        form.set_password("hunter22");
        form
    }

    #[tokio::test]
    async fn when_login_returns_token_then_session_is_authorized() {
        let session = SessionContext::new();
        let transport = ScriptedTransport::respond(
            200,
            json!({ "detail": "Welcome Amanda!", "token": "a long, totally legit token" }),
        );
        let mut form = form(&session);

        let state = form.submit(&transport).await.clone();

        assert_eq!(
            state,
            LoginState::LoggedIn {
                greeting: "Welcome Amanda!".to_string()
            }
        );
        assert!(session.is_authorized());
        assert_eq!(
            session.token().map(|token| token.as_str().to_string()).as_deref(),
            Some("a long, totally legit token")
        );
    }

    #[tokio::test]
    async fn when_login_posts_then_body_has_credentials() {
        let transport = ScriptedTransport::respond(200, json!({ "token": "t" }));
        let mut form = form(&SessionContext::new());

        form.submit(&transport).await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/api/login");
        assert_eq!(
            requests[0].body,
            Some(json!({ "email": "amanda@example.com", "password": "hunter22" }))
        );
    }

    #[tokio::test]
    async fn when_token_is_empty_then_login_fails_and_session_stays_anonymous() {
        let session = SessionContext::new();
        let transport = ScriptedTransport::respond(200, json!({ "token": "" }));
        let mut form = form(&session);

        let state = form.submit(&transport).await;

        assert!(matches!(state, LoginState::Failed { .. }));
        assert!(!session.is_authorized());
    }

    #[tokio::test]
    async fn when_credentials_are_rejected_without_detail_then_default_message_is_shown() {
        let session = SessionContext::new();
        let transport = ScriptedTransport::respond(401, serde_json::Value::Null);
        let mut form = form(&session);

        let state = form.submit(&transport).await;

        assert_eq!(
            state,
            &LoginState::Rejected {
                message: INVALID_CREDENTIALS.to_string()
            }
        );
        assert!(!session.is_authorized());
    }

    #[tokio::test]
    async fn when_credentials_are_rejected_with_detail_then_detail_is_shown() {
        let transport = ScriptedTransport::respond(
            401,
            json!({ "detail": "Incorrect authentication credentials." }),
        );
        let mut form = form(&SessionContext::new());

        let state = form.submit(&transport).await;

        assert_eq!(
            state,
            &LoginState::Rejected {
                message: "Incorrect authentication credentials.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn when_transport_times_out_then_login_fails() {
        let transport = ScriptedTransport::fail(TransportError::Timeout);
        let mut form = form(&SessionContext::new());

        let state = form.submit(&transport).await;

        assert_eq!(
            state,
            &LoginState::Failed {
                reason: "request timed out".to_string()
            }
        );
    }

    #[tokio::test]
    async fn when_logged_out_then_session_is_cleared() {
        let session = SessionContext::new();
        let transport = ScriptedTransport::respond(200, json!({ "token": "t" }));
        let mut form = form(&session);
        form.submit(&transport).await;

        assert!(form.logout());
        assert!(!session.is_authorized());
        assert_eq!(form.state(), &LoginState::Editing);
    }
}
