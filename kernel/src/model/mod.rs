pub mod auth;
pub mod booking;
pub mod hotel;
pub mod id;
pub mod ticket;
pub mod user;
