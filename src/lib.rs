mod database {
    pub mod actions;
    pub mod connection;
    pub mod error;
    pub mod repository;
    pub mod schema;
}
mod authentication {
    pub mod cryptography;
    pub mod jwt;
    pub mod middleware;
}
mod constants;

mod cache {
    pub mod cache;
}

pub mod api;
pub mod config;
pub mod service;

#[cfg(test)]
mod test_support;

pub use authentication::*;
pub use cache::cache::*;
pub use constants::*;
pub use database::*;
