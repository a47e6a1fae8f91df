pub mod choice;
pub mod datetime;
pub mod question;
pub mod user;
pub mod vote;
