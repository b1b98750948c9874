pub mod login;
pub mod roster;
