pub mod advertisement;
pub mod order;
