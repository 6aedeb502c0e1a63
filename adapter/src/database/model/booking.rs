use chrono::{DateTime, Utc};
use kernel::model::{
    booking::{Booking, BookingRoom},
    hotel::RoomOccupancy,
    id::{BookingId, HotelId, RoomId, UserId},
};

// One row per booking, with the occupied room joined in
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub hotel_id: HotelId,
    pub room_name: String,
    pub capacity: i32,
    pub room_created_at: DateTime<Utc>,
    pub room_updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            user_id,
            room_id,
            hotel_id,
            room_name,
            capacity,
            room_created_at,
            room_updated_at,
        } = value;
        Booking {
            booking_id,
            booked_by: user_id,
            room: BookingRoom {
                room_id,
                hotel_id,
                room_name,
                capacity,
                created_at: room_created_at,
                updated_at: room_updated_at,
            },
        }
    }
}

// Capacity and occupant count of one room, read under the booking
// transaction
#[derive(sqlx::FromRow)]
pub struct RoomOccupancyRow {
    pub capacity: i32,
    pub occupied: i64,
}

impl From<RoomOccupancyRow> for RoomOccupancy {
    fn from(value: RoomOccupancyRow) -> Self {
        let RoomOccupancyRow { capacity, occupied } = value;
        RoomOccupancy { capacity, occupied }
    }
}
