use axum::{
    extract::{Path, State},
    Json,
};
use kernel::model::id::HotelId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::hotel::{HotelWithRoomsResponse, HotelsResponse},
};

pub async fn show_hotel_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HotelsResponse>> {
    check_hotel_access(&user, &registry).await?;

    let hotels = registry.hotel_repository().find_all().await?;
    if hotels.is_empty() {
        return Err(AppError::EntityNotFound("no hotels are registered".into()));
    }

    Ok(Json(hotels.into()))
}

pub async fn show_hotel_rooms(
    user: AuthorizedUser,
    Path(hotel_id): Path<HotelId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HotelWithRoomsResponse>> {
    check_hotel_access(&user, &registry).await?;

    registry
        .hotel_repository()
        .find_with_rooms_by_id(hotel_id)
        .await
        .and_then(|hotel| match hotel {
            Some(hotel) => Ok(Json(hotel.into())),
            None => Err(AppError::EntityNotFound(format!(
                "hotel ({hotel_id}) not found"
            ))),
        })
}

// Browsing hotels requires the same ticket eligibility as booking a room:
// the caller must hold a paid, on-site ticket that includes accommodation.
async fn check_hotel_access(user: &AuthorizedUser, registry: &AppRegistry) -> AppResult<()> {
    let enrollment = registry
        .enrollment_repository()
        .find_with_ticket_by_user_id(user.id())
        .await?
        .ok_or_else(|| AppError::EntityNotFound("enrollment not found".into()))?;

    enrollment.into_ticket()?.check_hotel_access()
}
