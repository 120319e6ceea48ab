use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::Validate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type, Display,
    EnumString,
)]
#[sqlx(type_name = "ENUM")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    #[sqlx(rename = "pending")]
    Pending,
    #[sqlx(rename = "confirmed")]
    Confirmed,
    #[sqlx(rename = "cancelled")]
    Cancelled,
    #[sqlx(rename = "completed")]
    Completed,
}

// A confirmed purchase of one or more seats on one schedule. Passenger
// fields are a snapshot taken at booking time, independent of the user row
#[allow(dead_code)]
#[derive(Debug, sqlx::FromRow)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub schedule_id: i32,
    pub passenger_name: String,
    pub passenger_phone: String,
    pub passenger_email: Option<String>,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub booking_status: BookingStatus,
    pub booking_date: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct CreateBookingRequest {
    pub schedule_id: i32,
    #[validate(length(min = 1, message = "Passenger name is required"))]
    pub passenger_name: String,
    #[validate(length(min = 1, message = "Passenger phone is required"))]
    pub passenger_phone: String,
    #[validate(email(message = "Invalid passenger email"))]
    pub passenger_email: Option<String>,
    #[validate(length(min = 1, message = "At least one seat must be selected"))]
    pub selected_seats: Vec<String>,
    pub coupon_code: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingResponse {
    pub booking_id: i32,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub selected_seats: Vec<String>,
}

// Joined row for the admin dashboard list: route label and the seats
// bought, concatenated the way the dashboard renders them
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct BookingSummary {
    pub id: i32,
    pub passenger_name: String,
    pub passenger_phone: String,
    pub passenger_email: Option<String>,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub booking_status: BookingStatus,
    pub booking_date: NaiveDateTime,
    pub route: Option<String>,
    pub seats: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingSummary>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BookingStatusUpdateRequest {
    pub booking_id: i32,
    pub status: String,
}
