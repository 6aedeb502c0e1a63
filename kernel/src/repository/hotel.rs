use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    hotel::{Hotel, HotelWithRooms},
    id::HotelId,
};

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Hotel>>;
    async fn find_with_rooms_by_id(&self, hotel_id: HotelId)
        -> AppResult<Option<HotelWithRooms>>;
}
