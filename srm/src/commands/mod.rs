pub mod confirm;
pub mod delete;
