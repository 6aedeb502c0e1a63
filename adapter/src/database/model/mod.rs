pub mod booking;
pub mod hotel;
pub mod ticket;
pub mod user;
