mod budget;
mod category;
mod friend;
mod transaction;

pub(crate) use budget::Budget;
pub(crate) use category::Category;
pub(crate) use friend::{BalanceDirection, FriendBalance};
pub(crate) use transaction::{NewTransaction, Transaction, TransactionType};
