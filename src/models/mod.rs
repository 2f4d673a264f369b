pub mod customer;
pub mod note;

pub use customer::{Customer, CustomerDetail};
pub use note::Note;
