use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    booking::event::{CreateBooking, UpdateBookingRoom},
    id::BookingId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::booking::{
        BookingIdResponse, BookingResponse, CreateBookingRequest, UpdateBookingRequest,
    },
};

pub async fn show_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_repository()
        .find_by_user_id(user.id())
        .await
        .and_then(|booking| match booking {
            Some(booking) => Ok(Json(booking.into())),
            None => Err(AppError::EntityNotFound("booking not found".into())),
        })
}

pub async fn register_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingIdResponse>)> {
    req.validate(&())?;

    // Eligibility comes first: an ineligible ticket is rejected before the
    // room is even looked at.
    let enrollment = registry
        .enrollment_repository()
        .find_with_ticket_by_user_id(user.id())
        .await?
        .ok_or_else(|| AppError::EntityNotFound("enrollment not found".into()))?;
    enrollment.into_ticket()?.check_hotel_access()?;

    // Room existence and vacancy are verified by the repository inside the
    // same transaction as the insert.
    let booking_id = registry
        .booking_repository()
        .create(CreateBooking::new(user.id(), req.room_id))
        .await?;

    Ok((StatusCode::CREATED, Json(BookingIdResponse { booking_id })))
}

pub async fn update_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateBookingRequest>,
) -> AppResult<Json<BookingIdResponse>> {
    req.validate(&())?;

    let booking_id = registry
        .booking_repository()
        .update_room(UpdateBookingRoom::new(booking_id, user.id(), req.room_id))
        .await?;

    Ok(Json(BookingIdResponse { booking_id }))
}
