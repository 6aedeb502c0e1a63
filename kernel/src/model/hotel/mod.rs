use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};

use crate::model::id::{HotelId, RoomId};

#[derive(Debug)]
pub struct Hotel {
    pub hotel_id: HotelId,
    pub hotel_name: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct Room {
    pub room_id: RoomId,
    pub hotel_id: HotelId,
    pub room_name: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct HotelWithRooms {
    pub hotel: Hotel,
    pub rooms: Vec<Room>,
}

/// Snapshot of a room's occupancy, read inside the same transaction that
/// performs the booking write.
#[derive(Debug, Clone, Copy)]
pub struct RoomOccupancy {
    pub capacity: i32,
    pub occupied: i64,
}

impl RoomOccupancy {
    /// A room at exactly its capacity is full; one below capacity admits
    /// exactly one more occupant.
    pub fn check_vacancy(&self) -> AppResult<()> {
        if self.occupied >= i64::from(self.capacity) {
            return Err(AppError::ForbiddenOperation("room is already full".into()));
        }
        Ok(())
    }
}
