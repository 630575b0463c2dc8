pub mod router;
pub mod terminal;
