use crate::models::coupon::{CouponListResponse, CouponValidationRequest, CreateCouponRequest};
use crate::services::coupon_service::CouponService;
use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::{json, Value};
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Preview the discount a coupon yields on an order total. Read-only:
/// the coupon's usage count is not touched
#[openapi(tag = "Coupons")]
#[post("/coupons/validate", format = "json", data = "<request>")]
pub async fn validate_coupon(
    request: Json<CouponValidationRequest>,
    coupon_service: &State<CouponService>,
) -> Result<Json<Value>, AppError> {
    let request = request.into_inner();
    let quote = coupon_service
        .validate_coupon(&request.coupon_code, request.total_amount)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": quote
    })))
}

/// List all coupons
#[openapi(tag = "Coupons")]
#[get("/coupons")]
pub async fn list_coupons(
    _auth: AuthenticatedUser,
    coupon_service: &State<CouponService>,
) -> Result<Json<CouponListResponse>, AppError> {
    let coupons = coupon_service.list_coupons().await?;
    Ok(Json(CouponListResponse { coupons }))
}

/// Create a coupon
#[openapi(tag = "Coupons")]
#[post("/coupons", format = "json", data = "<request>")]
pub async fn create_coupon(
    request: Json<CreateCouponRequest>,
    _auth: AuthenticatedUser,
    coupon_service: &State<CouponService>,
) -> Result<Json<Value>, AppError> {
    let coupon_id = coupon_service.create_coupon(request.into_inner()).await?;
    Ok(Json(json!({
        "status": "success",
        "data": { "id": coupon_id }
    })))
}

/// Delete a coupon
#[openapi(tag = "Coupons")]
#[delete("/coupons/<id>")]
pub async fn delete_coupon(
    id: i32,
    _auth: AuthenticatedUser,
    coupon_service: &State<CouponService>,
) -> Result<Json<Value>, AppError> {
    coupon_service.delete_coupon(id).await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Coupon deleted successfully"
    })))
}
