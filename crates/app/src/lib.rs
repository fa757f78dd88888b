//! Cart, order and session persistence plus the checkout workflows built on top of them.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod sessions;
pub mod uuids;

#[cfg(test)]
mod test;
