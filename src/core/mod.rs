pub mod cards;
pub mod catalog;
pub mod logging;
pub mod rulings;
