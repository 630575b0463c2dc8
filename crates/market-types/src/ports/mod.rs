pub mod market_api;
