use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{
        event::{CreateBooking, UpdateBookingRoom},
        Booking,
    },
    hotel::RoomOccupancy,
    id::{BookingId, RoomId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::booking::{BookingRow, RoomOccupancyRow},
    ConnectionPool,
};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.user_id,
                    r.room_id,
                    r.hotel_id,
                    r.room_name,
                    r.capacity,
                    r.created_at AS room_created_at,
                    r.updated_at AS room_updated_at
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                WHERE b.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Booking::from))
    }

    async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
        let mut tx = self.db.begin().await?;

        // The occupancy read and the insert must not interleave with another
        // booking request for the same room, so the whole sequence runs under
        // SERIALIZABLE isolation.
        self.set_transaction_serializable(&mut tx).await?;

        {
            //
            // The target room must exist and still have a free bed.
            //
            let occupancy = self.fetch_room_occupancy(&mut tx, event.room_id).await?;
            occupancy.check_vacancy()?;

            //
            // The user may hold at most one booking. The UNIQUE constraint
            // on bookings.user_id backs this up at the storage level.
            //
            let existing: Option<(BookingId,)> =
                sqlx::query_as("SELECT booking_id FROM bookings WHERE user_id = $1")
                    .bind(event.booked_by)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            if existing.is_some() {
                return Err(AppError::UnprocessableEntity(format!(
                    "user ({}) already has a booking",
                    event.booked_by
                )));
            }
        }

        let booking_id = BookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO bookings (booking_id, user_id, room_id)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(booking_id)
        .bind(event.booked_by)
        .bind(event.room_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(booking_id)
    }

    async fn update_room(&self, event: UpdateBookingRoom) -> AppResult<BookingId> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        {
            //
            // The booking must exist and belong to the caller before any
            // room check happens.
            //
            let existing: Option<(UserId,)> =
                sqlx::query_as("SELECT user_id FROM bookings WHERE booking_id = $1")
                    .bind(event.booking_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            let Some((owner,)) = existing else {
                return Err(AppError::EntityNotFound(format!(
                    "booking ({}) not found",
                    event.booking_id
                )));
            };

            if owner != event.requested_user {
                return Err(AppError::ForbiddenOperation(format!(
                    "booking ({}) is owned by another user",
                    event.booking_id
                )));
            }

            //
            // The new room must exist and still have a free bed.
            //
            let occupancy = self.fetch_room_occupancy(&mut tx, event.room_id).await?;
            occupancy.check_vacancy()?;
        }

        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET
                    room_id = $1,
                    updated_at = CURRENT_TIMESTAMP(3)
                WHERE booking_id = $2
            "#,
        )
        .bind(event.room_id)
        .bind(event.booking_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(event.booking_id)
    }
}

impl BookingRepositoryImpl {
    // Both write paths read occupancy and then mutate, so they share the
    // SERIALIZABLE isolation level set through this helper.
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    async fn fetch_room_occupancy(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        room_id: RoomId,
    ) -> AppResult<RoomOccupancy> {
        let row: Option<RoomOccupancyRow> = sqlx::query_as(
            r#"
                SELECT
                    r.capacity,
                    COUNT(b.booking_id) AS occupied
                FROM rooms AS r
                LEFT JOIN bookings AS b ON b.room_id = r.room_id
                WHERE r.room_id = $1
                GROUP BY r.capacity
            "#,
        )
        .bind(room_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        match row {
            None => Err(AppError::EntityNotFound(format!(
                "room ({room_id}) not found"
            ))),
            Some(row) => Ok(row.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use kernel::model::id::{HotelId, UserId};

    use super::*;

    async fn create_user(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<UserId> {
        let user_id = UserId::new();
        sqlx::query("INSERT INTO users (user_id, user_name, email) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(name)
            .bind(format!("{name}@example.com"))
            .execute(pool)
            .await?;
        Ok(user_id)
    }

    async fn create_room(pool: &sqlx::PgPool, capacity: i32) -> anyhow::Result<RoomId> {
        let hotel_id = HotelId::new();
        sqlx::query("INSERT INTO hotels (hotel_id, hotel_name, image_url) VALUES ($1, $2, $3)")
            .bind(hotel_id)
            .bind("Test Hotel")
            .bind("https://example.com/hotel.png")
            .execute(pool)
            .await?;

        let room_id = RoomId::new();
        sqlx::query(
            "INSERT INTO rooms (room_id, hotel_id, room_name, capacity) VALUES ($1, $2, $3, $4)",
        )
        .bind(room_id)
        .bind(hotel_id)
        .bind("101")
        .bind(capacity)
        .execute(pool)
        .await?;
        Ok(room_id)
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_create_and_find_booking(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = create_user(&pool, "guest1").await?;
        let room_id = create_room(&pool, 10).await?;

        let booking_id = repo
            .create(CreateBooking::new(user_id, room_id))
            .await?;

        let found = repo.find_by_user_id(user_id).await?;
        let booking = found.expect("booking should exist");
        assert_eq!(booking.booking_id, booking_id);
        assert_eq!(booking.booked_by, user_id);
        assert_eq!(booking.room.room_id, room_id);

        // A second read with no intervening write sees the same booking
        let again = repo.find_by_user_id(user_id).await?.unwrap();
        assert_eq!(again.booking_id, booking.booking_id);
        assert_eq!(again.room.room_id, booking.room.room_id);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_create_rejects_full_room(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let first = create_user(&pool, "guest1").await?;
        let second = create_user(&pool, "guest2").await?;
        let room_id = create_room(&pool, 1).await?;

        repo.create(CreateBooking::new(first, room_id)).await?;

        let res = repo.create(CreateBooking::new(second, room_id)).await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_create_rejects_second_booking_for_same_user(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = create_user(&pool, "guest1").await?;
        let room_id = create_room(&pool, 10).await?;

        repo.create(CreateBooking::new(user_id, room_id)).await?;

        let res = repo.create(CreateBooking::new(user_id, room_id)).await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_create_rejects_unknown_room(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = create_user(&pool, "guest1").await?;

        let res = repo
            .create(CreateBooking::new(user_id, RoomId::new()))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_unknown_room_wins_over_duplicate_booking(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = create_user(&pool, "guest1").await?;
        let room_id = create_room(&pool, 10).await?;

        repo.create(CreateBooking::new(user_id, room_id)).await?;

        // The room is verified before the duplicate-booking rule, so a
        // nonexistent room is reported as not-found even for a user who
        // already holds a booking
        let res = repo
            .create(CreateBooking::new(user_id, RoomId::new()))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_update_moves_booking_to_new_room(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = create_user(&pool, "guest1").await?;
        let old_room = create_room(&pool, 10).await?;
        let new_room = create_room(&pool, 10).await?;

        let booking_id = repo.create(CreateBooking::new(user_id, old_room)).await?;

        let updated_id = repo
            .update_room(UpdateBookingRoom::new(booking_id, user_id, new_room))
            .await?;
        assert_eq!(updated_id, booking_id);

        let booking = repo.find_by_user_id(user_id).await?.unwrap();
        assert_eq!(booking.room.room_id, new_room);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_update_rejects_booking_of_another_user(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let owner = create_user(&pool, "guest1").await?;
        let intruder = create_user(&pool, "guest2").await?;
        let room_id = create_room(&pool, 10).await?;
        let other_room = create_room(&pool, 10).await?;

        let booking_id = repo.create(CreateBooking::new(owner, room_id)).await?;

        let res = repo
            .update_room(UpdateBookingRoom::new(booking_id, intruder, other_room))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));

        // The booking is untouched
        let booking = repo.find_by_user_id(owner).await?.unwrap();
        assert_eq!(booking.room.room_id, room_id);
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_update_rejects_full_room(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let first = create_user(&pool, "guest1").await?;
        let second = create_user(&pool, "guest2").await?;
        let roomy = create_room(&pool, 10).await?;
        let single = create_room(&pool, 1).await?;

        repo.create(CreateBooking::new(second, single)).await?;
        let booking_id = repo.create(CreateBooking::new(first, roomy)).await?;

        let res = repo
            .update_room(UpdateBookingRoom::new(booking_id, first, single))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_update_rejects_unknown_booking(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = BookingRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user_id = create_user(&pool, "guest1").await?;
        let room_id = create_room(&pool, 10).await?;

        let res = repo
            .update_room(UpdateBookingRoom::new(BookingId::new(), user_id, room_id))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }
}
