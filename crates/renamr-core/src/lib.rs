pub mod config;
pub mod logging;

pub mod api;
pub mod error;
pub mod generator;
pub mod host;
pub mod interceptor;
pub mod ledger;
pub mod model;
pub mod naming;
pub mod protocol;
pub mod session;
pub mod validate;
