// src/documents/mod.rs

pub mod handlers;
pub mod models;
pub mod routes;
pub mod tasks;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::documents_routes;
