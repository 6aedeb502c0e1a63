use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    booking::{
        event::{CreateBooking, UpdateBookingRoom},
        Booking,
    },
    id::{BookingId, UserId},
};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // Fetch the caller's current booking together with its room detail
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>>;
    // Create a booking; the room's vacancy is verified in the same
    // transaction as the insert
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId>;
    // Move an existing booking to another room; ownership and vacancy are
    // verified in the same transaction as the update
    async fn update_room(&self, event: UpdateBookingRoom) -> AppResult<BookingId>;
}
