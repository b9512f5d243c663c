pub mod authorization;
pub mod reports;
pub mod entropy;
pub mod disputes;
pub mod recent_history;
pub mod validators;
pub mod services;
pub mod statistics;
pub mod safrole;
pub mod accumulate;
pub mod privileges;

pub mod block;
pub mod assurances;
pub mod guarantees;
pub mod preimages;
