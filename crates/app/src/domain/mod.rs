//! Trolley Domain Concerns

pub mod carts;
pub mod checkout;
pub mod customers;
pub mod history;
pub mod items;
pub mod orders;
