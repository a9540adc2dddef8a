use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::{
    ApiRequest, ApiResponse, ApiTransport, FieldError, RegistrationField, RegistrationPayload,
    TransportError, ValidationErrorSet,
};
use crate::interface_adapters::protocol::{DetailResponse, ValidationErrorBody};

// Prefix the dev server proxies to the backend.
pub const API_PREFIX: &str = "/api";
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Registration successful";
pub const RETRY_PROMPT: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Editing,
    Submitting,
    Succeeded { message: String },
    Rejected { errors: ValidationErrorSet },
    // Transport failures and unexpected responses. The reason is for logs, not for display.
    Failed { reason: String },
}

// `/register` is sent to `/api/register`; paths already under the prefix are kept.
pub fn api_path(url: &str) -> String {
    if url.starts_with(API_PREFIX) {
        return url.to_string();
    }
    let separator = if url.starts_with('/') { "" } else { "/" };
    format!("{API_PREFIX}{separator}{url}")
}

// What a finished request means for the form.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Accepted { message: String },
    Rejected(ValidationErrorSet),
    Failed(String),
}

impl SubmissionOutcome {
    pub fn from_response(result: Result<ApiResponse, TransportError>) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "registration request failed.");
                return SubmissionOutcome::Failed(err.to_string());
            }
        };

        if response.is_success() {
            let message = serde_json::from_value::<DetailResponse>(response.body)
                .ok()
                .and_then(DetailResponse::text)
                .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
            return SubmissionOutcome::Accepted { message };
        }

        if response.is_client_error() {
            return match serde_json::from_value::<ValidationErrorBody>(response.body) {
                Ok(body) => {
                    let errors = body.into_error_set();
                    if errors.is_empty() {
                        // Nothing to highlight, so fall back to the generic prompt.
                        tracing::warn!(status = response.status, "rejection named no known field.");
                        SubmissionOutcome::Failed(format!(
                            "{} response named no known field",
                            response.status
                        ))
                    } else {
                        SubmissionOutcome::Rejected(errors)
                    }
                }
                Err(err) => {
                    tracing::warn!(status = response.status, error = %err, "unstructured rejection.");
                    SubmissionOutcome::Failed(format!(
                        "unexpected {} response without field errors",
                        response.status
                    ))
                }
            };
        }

        tracing::error!(status = response.status, "registration rejected by server.");
        SubmissionOutcome::Failed(format!("unexpected {} response", response.status))
    }
}

// In-flight submission detached from the form, so the form is not borrowed
// across the await.
pub struct PendingSubmission {
    endpoint: String,
    payload: RegistrationPayload,
    mounted: Arc<AtomicBool>,
}

impl PendingSubmission {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // Issues exactly one request. Returns `None` when the form was unmounted
    // before the response arrived.
    #[tracing::instrument(name = "registration_submit", skip_all, fields(endpoint = %self.endpoint))]
    pub async fn send(self, transport: &dyn ApiTransport) -> Option<SubmissionOutcome> {
        let body = match serde_json::to_value(&self.payload) {
            Ok(body) => body,
            Err(err) => return Some(SubmissionOutcome::Failed(err.to_string())),
        };

        let result = transport
            .send(ApiRequest::post_json(self.endpoint.clone(), body))
            .await;

        if !self.mounted.load(Ordering::Acquire) {
            tracing::debug!("form unmounted; dropping registration response.");
            return None;
        }

        Some(SubmissionOutcome::from_response(result))
    }
}

// Registration form state: six inputs plus the result of the last submission.
pub struct RegistrationForm {
    url: String,
    payload: RegistrationPayload,
    state: FormState,
    mounted: Arc<AtomicBool>,
}

impl RegistrationForm {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            payload: RegistrationPayload::new(),
            state: FormState::Editing,
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn endpoint(&self) -> String {
        api_path(&self.url)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn value(&self, field: RegistrationField) -> &str {
        self.payload.get(field)
    }

    pub fn payload(&self) -> &RegistrationPayload {
        &self.payload
    }

    pub fn field_errors(&self, field: RegistrationField) -> &[FieldError] {
        match &self.state {
            FormState::Rejected { errors } => errors.messages(field),
            _ => &[],
        }
    }

    // Editing a field clears its inline errors; errors on other fields stay.
    pub fn update_field(&mut self, field: RegistrationField, value: impl Into<String>) {
        self.payload.set(field, value);
        if let FormState::Rejected { errors } = &mut self.state {
            errors.clear_field(field);
        }
    }

    pub fn begin_submit(&mut self) -> PendingSubmission {
        self.state = FormState::Submitting;
        PendingSubmission {
            endpoint: self.endpoint(),
            payload: self.payload.clone(),
            mounted: Arc::clone(&self.mounted),
        }
    }

    // Returns false when the outcome was ignored because the form is unmounted.
    pub fn apply(&mut self, outcome: SubmissionOutcome) -> bool {
        if !self.is_mounted() {
            return false;
        }

        self.state = match outcome {
            SubmissionOutcome::Accepted { message } => {
                tracing::info!("registration accepted.");
                FormState::Succeeded { message }
            }
            SubmissionOutcome::Rejected(errors) => {
                tracing::info!(fields = errors.len(), "registration rejected.");
                FormState::Rejected { errors }
            }
            SubmissionOutcome::Failed(reason) => FormState::Failed { reason },
        };
        true
    }

    pub async fn submit(&mut self, transport: &dyn ApiTransport) -> &FormState {
        let pending = self.begin_submit();
        if let Some(outcome) = pending.send(transport).await {
            self.apply(outcome);
        }
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    // Navigation away: inputs are discarded and late responses are ignored.
    pub fn unmount(&mut self) {
        self.mounted.store(false, Ordering::Release);
        self.payload = RegistrationPayload::new();
    }
}

impl Drop for RegistrationForm {
    fn drop(&mut self) {
        self.mounted.store(false, Ordering::Release);
    }
}
