use derive_new::new;

use crate::model::id::{BookingId, RoomId, UserId};

#[derive(new)]
pub struct CreateBooking {
    pub booked_by: UserId,
    pub room_id: RoomId,
}

#[derive(new)]
pub struct UpdateBookingRoom {
    pub booking_id: BookingId,
    pub requested_user: UserId,
    pub room_id: RoomId,
}
