pub mod account_service;
pub mod analytics_service;
pub mod chart_service;
pub mod ledger_service;
pub mod ledger_view;
pub mod preference_service;
pub mod session_service;
