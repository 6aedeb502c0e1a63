use chrono::{DateTime, Utc};

use crate::model::id::{BookingId, HotelId, RoomId, UserId};

pub mod event;

#[derive(Debug)]
pub struct Booking {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub room: BookingRoom,
}

#[derive(Debug)]
pub struct BookingRoom {
    pub room_id: RoomId,
    pub hotel_id: HotelId,
    pub room_name: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
