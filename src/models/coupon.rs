use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type, Display)]
#[sqlx(type_name = "ENUM")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CouponStatus {
    #[sqlx(rename = "active")]
    Active,
    #[sqlx(rename = "inactive")]
    Inactive,
}

// A discount rule: percentage with an optional cap, a minimum spend,
// a validity window and a usage quota
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Coupon {
    pub id: i32,
    pub coupon_code: String,
    pub discount_percentage: Decimal,
    pub max_discount_amount: Option<Decimal>,
    pub min_booking_amount: Decimal,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub usage_limit: i32,
    pub used_count: i32,
    pub status: CouponStatus,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CouponValidationRequest {
    pub coupon_code: String,
    pub total_amount: Decimal,
}

// The evaluated discount for a given order total; returned by the
// read-only preview and embedded in the booking computation
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CouponQuote {
    pub coupon_code: String,
    pub discount_percentage: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct CreateCouponRequest {
    #[validate(length(min = 1, message = "Coupon code is required"))]
    pub coupon_code: String,
    pub discount_percentage: Decimal,
    pub max_discount_amount: Option<Decimal>,
    pub min_booking_amount: Decimal,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: NaiveDate,
    #[validate(range(min = 1, message = "Usage limit must be positive"))]
    pub usage_limit: i32,
    pub status: Option<CouponStatus>,
}

// Row in the admin coupon list
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct CouponSummary {
    pub id: i32,
    pub coupon_code: String,
    pub discount_percentage: Decimal,
    pub max_discount_amount: Option<Decimal>,
    pub min_booking_amount: Decimal,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub usage_limit: i32,
    pub used_count: i32,
    pub status: CouponStatus,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct CouponListResponse {
    pub coupons: Vec<CouponSummary>,
}
