pub mod advertisement_service;
pub mod order_service;
pub mod pipeline;
pub mod views;
