use serde_json::Value;

use crate::domain::{ApiRequest, ApiTransport};
use crate::use_cases::auth_gate::SessionContext;
use crate::use_cases::register::api_path;

pub const PROFILE_PATH: &str = "/profile";

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileState {
    // No token; nothing was sent.
    SignedOut,
    Loaded(Value),
    // The backend refused the token. The session has been cleared.
    Expired,
    Failed { reason: String },
}

// Protected read of the logged-in user's profile, authorized with the session token.
pub struct ProfileLoader {
    session: SessionContext,
}

impl ProfileLoader {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    pub fn endpoint(&self) -> String {
        api_path(PROFILE_PATH)
    }

    #[tracing::instrument(name = "profile_load", skip_all, fields(endpoint = %self.endpoint()))]
    pub async fn load(&self, transport: &dyn ApiTransport) -> ProfileState {
        let Some(request) = self.session.authorize(ApiRequest::get(self.endpoint())) else {
            tracing::debug!("no session token; profile not requested.");
            return ProfileState::SignedOut;
        };

        let response = match transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "profile request failed.");
                return ProfileState::Failed {
                    reason: err.to_string(),
                };
            }
        };

        match response.status {
            200..=299 => ProfileState::Loaded(response.body),
            401 | 403 => {
                self.session.clear();
                tracing::info!(status = response.status, "session token refused; cleared.");
                ProfileState::Expired
            }
            status => {
                tracing::error!(status, "profile request rejected.");
                ProfileState::Failed {
                    reason: format!("unexpected {status} response"),
                }
            }
        }
    }
}
