use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    hotel::{Hotel, HotelWithRooms, Room},
    id::HotelId,
};
use kernel::repository::hotel::HotelRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::hotel::{HotelRow, RoomRow},
    ConnectionPool,
};

#[derive(new)]
pub struct HotelRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl HotelRepository for HotelRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Hotel>> {
        let rows: Vec<HotelRow> = sqlx::query_as(
            r#"
                SELECT
                    hotel_id,
                    hotel_name,
                    image_url,
                    created_at,
                    updated_at
                FROM hotels
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Hotel::from).collect())
    }

    async fn find_with_rooms_by_id(
        &self,
        hotel_id: HotelId,
    ) -> AppResult<Option<HotelWithRooms>> {
        let hotel_row: Option<HotelRow> = sqlx::query_as(
            r#"
                SELECT
                    hotel_id,
                    hotel_name,
                    image_url,
                    created_at,
                    updated_at
                FROM hotels
                WHERE hotel_id = $1
            "#,
        )
        .bind(hotel_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(hotel_row) = hotel_row else {
            return Ok(None);
        };

        let room_rows: Vec<RoomRow> = sqlx::query_as(
            r#"
                SELECT
                    room_id,
                    hotel_id,
                    room_name,
                    capacity,
                    created_at,
                    updated_at
                FROM rooms
                WHERE hotel_id = $1
                ORDER BY room_name ASC
            "#,
        )
        .bind(hotel_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(Some(HotelWithRooms {
            hotel: hotel_row.into(),
            rooms: room_rows.into_iter().map(Room::from).collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use kernel::model::id::RoomId;

    use super::*;

    #[sqlx::test(migrations = "../migrations")]
    async fn test_find_hotel_with_rooms(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = HotelRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let hotel_id = HotelId::new();
        sqlx::query("INSERT INTO hotels (hotel_id, hotel_name, image_url) VALUES ($1, $2, $3)")
            .bind(hotel_id)
            .bind("Grand Plaza")
            .bind("https://example.com/plaza.png")
            .execute(&pool)
            .await?;
        for (name, capacity) in [("101", 2), ("102", 4)] {
            sqlx::query(
                "INSERT INTO rooms (room_id, hotel_id, room_name, capacity) VALUES ($1, $2, $3, $4)",
            )
            .bind(RoomId::new())
            .bind(hotel_id)
            .bind(name)
            .bind(capacity)
            .execute(&pool)
            .await?;
        }

        let hotels = repo.find_all().await?;
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].hotel_name, "Grand Plaza");

        let hotel = repo
            .find_with_rooms_by_id(hotel_id)
            .await?
            .expect("hotel should exist");
        assert_eq!(hotel.hotel.hotel_id, hotel_id);
        assert_eq!(hotel.rooms.len(), 2);
        assert_eq!(hotel.rooms[0].room_name, "101");
        assert_eq!(hotel.rooms[1].capacity, 4);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_unknown_hotel_is_none(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = HotelRepositoryImpl::new(ConnectionPool::new(pool));
        let res = repo.find_with_rooms_by_id(HotelId::new()).await?;
        assert!(res.is_none());
        Ok(())
    }
}
