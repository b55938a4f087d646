pub mod colors;
pub mod health;
pub mod snapshot;
pub mod update;
pub mod validation;
