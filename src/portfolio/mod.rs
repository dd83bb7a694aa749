pub mod contract;
pub mod store;

pub use contract::{Contract, OptionType};
pub use store::{ContractStore, Portfolio, MAX_CONTRACTS};
