pub mod api;
pub mod audit;
pub mod persistence;
