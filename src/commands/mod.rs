pub mod admins;
pub mod cart;
pub mod meals;
pub mod orders;
pub mod payments;
pub mod plans;
pub mod settings;
pub mod support;
