mod errors;
mod fields;
mod ports;
mod registration;
mod session;

// Re-export the domain boundary types and ports.
pub use errors::{TransportError, UnknownField};
pub use fields::RegistrationField;
pub use ports::{ApiRequest, ApiResponse, ApiTransport, HttpMethod};
pub use registration::{FieldError, RegistrationPayload, ValidationErrorSet};
pub use session::SessionToken;
