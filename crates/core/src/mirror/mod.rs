pub mod dispatcher;
pub mod rest;
pub mod traits;
