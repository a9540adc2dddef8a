use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{ApiRequest, SessionToken};

// Session handle injected into every component that needs the auth check.
// Clones share the same slot, so a login seen by one is seen by all.
#[derive(Clone, Default)]
pub struct SessionContext {
    token: Arc<RwLock<Option<SessionToken>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_token(&self, token: SessionToken) {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(token);
    }

    pub fn token(&self) -> Option<SessionToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // Returns whether a token was present.
    pub fn clear(&self) -> bool {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        slot.take().is_some()
    }

    pub fn is_authorized(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    // Attaches the stored token to a protected call; `None` when signed out.
    pub fn authorize(&self, request: ApiRequest) -> Option<ApiRequest> {
        self.token()
            .map(|token| request.with_bearer(token.as_str()))
    }
}
