pub mod account;
pub mod analytics;
pub mod chart;
pub mod mirror;
pub mod preferences;
pub mod settings;
pub mod transaction;
