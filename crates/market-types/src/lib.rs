//! market-types: domain entities and remote-API ports shared by every crate

pub mod domain;
pub mod ports;
