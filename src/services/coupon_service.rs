use crate::models::coupon::{
    Coupon, CouponQuote, CouponStatus, CouponSummary, CreateCouponRequest,
};
use crate::utils::error::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::mysql::MySqlConnection;
use sqlx::MySqlPool;
use validator::Validate;

const COUPON_COLUMNS: &str = "id, coupon_code, discount_percentage, max_discount_amount,
    min_booking_amount, valid_from, valid_until, usage_limit, used_count, status";

/// Compute the discount a coupon yields on an order total.
///
/// Pure evaluation, shared by the read-only preview and the booking
/// transaction: validity window, minimum spend and quota are checked here,
/// then the percentage discount is rounded to two decimals and clamped to
/// the coupon's cap. `final_amount` is always `total_amount - discount`.
pub fn evaluate_coupon(
    coupon: &Coupon,
    total_amount: Decimal,
    today: NaiveDate,
) -> AppResult<CouponQuote> {
    if coupon.status != CouponStatus::Active
        || today < coupon.valid_from
        || today > coupon.valid_until
    {
        return Err(AppError::ValidationError(
            "Invalid or expired coupon code".into(),
        ));
    }

    if total_amount < coupon.min_booking_amount {
        return Err(AppError::ValidationError(format!(
            "Minimum booking amount required: BDT {}",
            coupon.min_booking_amount
        )));
    }

    if coupon.used_count >= coupon.usage_limit {
        return Err(AppError::Unprocessable("Coupon usage limit reached".into()));
    }

    let mut discount_amount =
        (total_amount * coupon.discount_percentage / Decimal::from(100)).round_dp(2);
    if let Some(cap) = coupon.max_discount_amount {
        if discount_amount > cap {
            discount_amount = cap;
        }
    }

    Ok(CouponQuote {
        coupon_code: coupon.coupon_code.clone(),
        discount_percentage: coupon.discount_percentage,
        discount_amount,
        final_amount: total_amount - discount_amount,
    })
}

#[derive(Clone)]
pub struct CouponService {
    pool: MySqlPool,
}

impl CouponService {
    pub fn new(pool: MySqlPool) -> Self {
        CouponService { pool }
    }

    // Read-only discount preview for the checkout page. Never touches
    // used_count
    pub async fn validate_coupon(
        &self,
        coupon_code: &str,
        total_amount: Decimal,
    ) -> AppResult<CouponQuote> {
        let sql = format!("SELECT {COUPON_COLUMNS} FROM coupons WHERE coupon_code = ?");
        let coupon = sqlx::query_as::<_, Coupon>(&sql)
            .bind(coupon_code)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid coupon code".into()))?;

        evaluate_coupon(&coupon, total_amount, Utc::now().date_naive())
    }

    /// Apply a coupon inside the booking transaction.
    ///
    /// The row is locked FOR UPDATE, evaluated, and the usage counter is
    /// incremented with a `used_count < usage_limit` precondition so the
    /// quota holds under concurrent bookings. Rejection at any step aborts
    /// the caller's transaction; a bad coupon never degrades to a silent
    /// zero discount.
    pub async fn redeem_coupon(
        conn: &mut MySqlConnection,
        coupon_code: &str,
        total_amount: Decimal,
    ) -> AppResult<CouponQuote> {
        let sql = format!("SELECT {COUPON_COLUMNS} FROM coupons WHERE coupon_code = ? FOR UPDATE");
        let coupon = sqlx::query_as::<_, Coupon>(&sql)
            .bind(coupon_code)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid coupon code".into()))?;

        let quote = evaluate_coupon(&coupon, total_amount, Utc::now().date_naive())?;

        let updated = sqlx::query(
            "UPDATE coupons SET used_count = used_count + 1
             WHERE id = ? AND used_count < usage_limit",
        )
        .bind(coupon.id)
        .execute(&mut *conn)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Unprocessable("Coupon usage limit reached".into()));
        }

        Ok(quote)
    }

    pub async fn list_coupons(&self) -> AppResult<Vec<CouponSummary>> {
        let sql = format!("SELECT {COUPON_COLUMNS} FROM coupons ORDER BY id DESC");
        let coupons = sqlx::query_as::<_, CouponSummary>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(coupons)
    }

    pub async fn create_coupon(&self, request: CreateCouponRequest) -> AppResult<i32> {
        request.validate()?;

        if request.discount_percentage <= Decimal::ZERO
            || request.discount_percentage > Decimal::from(100)
        {
            return Err(AppError::ValidationError(
                "Discount percentage must be between 0 and 100".into(),
            ));
        }

        let existing: Option<i32> =
            sqlx::query_scalar("SELECT id FROM coupons WHERE coupon_code = ?")
                .bind(&request.coupon_code)
                .fetch_optional(&self.pool)
                .await?;

        if existing.is_some() {
            return Err(AppError::Conflict("Coupon code already exists".into()));
        }

        let valid_from = request.valid_from.unwrap_or_else(|| Utc::now().date_naive());
        let status = request.status.unwrap_or(CouponStatus::Active);

        let result = sqlx::query(
            "INSERT INTO coupons
             (coupon_code, discount_percentage, max_discount_amount, min_booking_amount,
              valid_from, valid_until, usage_limit, status)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&request.coupon_code)
        .bind(request.discount_percentage)
        .bind(request.max_discount_amount)
        .bind(request.min_booking_amount)
        .bind(valid_from)
        .bind(request.valid_until)
        .bind(request.usage_limit)
        .bind(status.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i32)
    }

    pub async fn delete_coupon(&self, coupon_id: i32) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM coupons WHERE id = ?")
            .bind(coupon_id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Coupon not found".into()));
        }

        Ok(())
    }
}
