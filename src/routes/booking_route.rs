use crate::models::booking::{
    BookingListResponse, BookingStatusUpdateRequest, CreateBookingRequest,
};
use crate::services::booking_service::BookingService;
use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::{json, Value};
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Book seats on a schedule, optionally applying a coupon. The whole
/// operation is atomic: on any failure nothing is written
#[openapi(tag = "Bookings")]
#[post("/bookings", format = "json", data = "<request>")]
pub async fn create_booking(
    request: Json<CreateBookingRequest>,
    booking_service: &State<BookingService>,
) -> Result<Json<Value>, AppError> {
    let response = booking_service.create_booking(request.into_inner()).await?;

    Ok(Json(json!({
        "status": "success",
        "data": response
    })))
}

/// List bookings for the dashboard, newest first
#[openapi(tag = "Bookings")]
#[get("/bookings")]
pub async fn list_bookings(
    _auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingListResponse>, AppError> {
    let bookings = booking_service.list_bookings().await?;
    Ok(Json(BookingListResponse { bookings }))
}

/// Update a booking's status
#[openapi(tag = "Bookings")]
#[put("/bookings/status", format = "json", data = "<request>")]
pub async fn update_booking_status(
    request: Json<BookingStatusUpdateRequest>,
    _auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<Value>, AppError> {
    let request = request.into_inner();
    booking_service
        .update_booking_status(request.booking_id, &request.status)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Booking status updated successfully"
    })))
}

/// Delete a booking and its seat links
#[openapi(tag = "Bookings")]
#[delete("/bookings/<id>")]
pub async fn delete_booking(
    id: i32,
    _auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<Value>, AppError> {
    booking_service.delete_booking(id).await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Booking deleted successfully"
    })))
}
