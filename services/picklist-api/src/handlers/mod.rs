pub mod health;
pub mod picklist;

pub use health::*;
pub use picklist::*;
