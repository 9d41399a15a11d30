pub mod auction;
pub mod clock;
pub mod ledger;
pub mod persistence;
pub mod registry;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;
