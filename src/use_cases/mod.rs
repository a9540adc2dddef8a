pub mod auth_gate;
pub mod login;
pub mod profile;
pub mod register;
pub mod route_guard;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_gate::SessionContext;
pub use login::{LoginForm, LoginState};
pub use profile::{ProfileLoader, ProfileState};
pub use register::{FormState, PendingSubmission, RegistrationForm, SubmissionOutcome};
pub use route_guard::{Access, ClientRoutes, RouteDecision, View, guard};
