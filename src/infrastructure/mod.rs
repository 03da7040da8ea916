pub mod auth;
pub mod inference;
pub mod observability;
pub mod persistence;
