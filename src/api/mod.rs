//! API handlers for the Bibliotheca REST endpoints

pub mod books;
pub mod health;
pub mod import;
pub mod members;
pub mod openapi;
pub mod transactions;
