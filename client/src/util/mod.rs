pub mod auth;
pub mod bootstrap;
pub mod credential_store;
pub mod fetch;
pub mod lineup;
pub mod platform;
pub mod timer;
