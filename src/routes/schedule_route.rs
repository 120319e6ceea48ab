use crate::models::route::RouteListResponse;
use crate::models::schedule::ScheduleSearchResponse;
use crate::models::seat::SeatMapResponse;
use crate::services::schedule_service::ScheduleService;
use crate::services::seat_service::SeatService;
use crate::utils::error::AppError;
use chrono::{NaiveDate, Utc};
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// List all bus routes
#[openapi(tag = "Schedules")]
#[get("/routes")]
pub async fn list_routes(
    schedule_service: &State<ScheduleService>,
) -> Result<Json<RouteListResponse>, AppError> {
    let routes = schedule_service.list_routes().await?;
    Ok(Json(RouteListResponse { routes }))
}

/// Search active schedules, optionally by route and travel date
#[openapi(tag = "Schedules")]
#[get("/schedules?<route_id>&<date>")]
pub async fn search_schedules(
    route_id: Option<i32>,
    date: Option<String>,
    schedule_service: &State<ScheduleService>,
) -> Result<Json<ScheduleSearchResponse>, AppError> {
    let from_date = match date {
        Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest("Invalid date format".into()))?,
        None => Utc::now().date_naive(),
    };

    let schedules = schedule_service
        .search_schedules(route_id, from_date)
        .await?;
    Ok(Json(ScheduleSearchResponse { schedules }))
}

/// Per-seat status grid for a schedule, created on first access
#[openapi(tag = "Seats")]
#[get("/schedules/seats?<schedule_id>")]
pub async fn get_seat_map(
    schedule_id: i32,
    seat_service: &State<SeatService>,
) -> Result<Json<SeatMapResponse>, AppError> {
    let seat_map = seat_service.get_seat_map(schedule_id).await?;
    Ok(Json(seat_map))
}
