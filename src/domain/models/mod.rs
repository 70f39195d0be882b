pub mod credential;
pub mod outcome;
pub mod registration;
pub mod user;
