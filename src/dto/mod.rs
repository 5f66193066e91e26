pub mod auth;
pub mod orders;
pub mod products;
pub mod settings;
