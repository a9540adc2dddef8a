pub mod clients;
pub mod handlers;
pub mod mock;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod view;
