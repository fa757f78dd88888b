//! Shared test infrastructure.

mod memory;

pub(crate) use db::TestDb;
pub(crate) use memory::{MemoryCartsRepository, MemoryOrdersRepository, MemoryStore};
