pub mod customers;
pub mod notes;
