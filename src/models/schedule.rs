use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::models::bus::BusType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type, Display)]
#[sqlx(type_name = "ENUM")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScheduleStatus {
    #[sqlx(rename = "active")]
    Active,
    #[sqlx(rename = "cancelled")]
    Cancelled,
}

// One bus trip instance on a route, with its own fare and seat inventory
#[derive(Debug, sqlx::FromRow)]
pub struct Schedule {
    pub id: i32,
    pub bus_id: i32,
    pub route_id: i32,
    pub journey_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub fare: Decimal,
    pub available_seats: i32,
    pub status: ScheduleStatus,
}

// Single schedule row in ScheduleSearchResponse, joined with bus and route
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct ScheduleDetail {
    pub id: i32,
    pub journey_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub fare: Decimal,
    pub available_seats: i32,
    pub bus_name: String,
    pub bus_number: String,
    pub bus_type: BusType,
    pub total_seats: i32,
    pub from_location: String,
    pub to_location: String,
    pub distance_km: Decimal,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ScheduleSearchResponse {
    pub schedules: Vec<ScheduleDetail>,
}
