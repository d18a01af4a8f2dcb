mod account;
mod category;
mod transaction;

pub use account::{Account, AccountType};
pub use category::{Category, CategoryType};
pub use transaction::{Flow, Transaction};
