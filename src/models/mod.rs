pub mod booking;
pub mod catalog;
pub mod notice;
pub mod user;
