//! market-hex: marketplace front-end core (view pipeline + state machines) and
//! its inbound terminal adapter

pub mod config;
pub mod errors;

pub mod application;

pub use market_types::{domain, ports};

pub mod inbound; // router + terminal presenter
