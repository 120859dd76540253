mod bill;
mod budget;
mod category;

pub(crate) use bill::{Bill, BillType};
pub(crate) use budget::Budget;
pub(crate) use category::Category;
