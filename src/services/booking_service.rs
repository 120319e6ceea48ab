use crate::models::booking::{
    BookingResponse, BookingStatus, BookingSummary, CreateBookingRequest,
};
use crate::models::schedule::{Schedule, ScheduleStatus};
use crate::models::seat::parse_seat_number;
use crate::services::coupon_service::CouponService;
use crate::services::seat_service::SeatService;
use crate::services::user_service::UserService;
use crate::utils::error::{AppError, AppResult};
use log::info;
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use std::collections::HashSet;
use std::str::FromStr;
use validator::Validate;

#[derive(Clone)]
pub struct BookingService {
    pool: MySqlPool,
}

impl BookingService {
    pub fn new(pool: MySqlPool) -> Self {
        BookingService { pool }
    }

    /// Create a booking: fare computation, optional coupon redemption,
    /// guest resolution, seat reservation and the seat-counter decrement,
    /// all inside one transaction.
    ///
    /// Any failure after `begin` rolls the whole thing back; a booking row
    /// without its seats is never observable. Seat conflicts surface as
    /// Conflict naming the first contested seat and the caller may resubmit
    /// with a different selection.
    pub async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> AppResult<BookingResponse> {
        request.validate()?;
        Self::validate_seat_selection(&request.selected_seats)?;
        let seat_count = request.selected_seats.len();

        let mut tx = self.pool.begin().await?;

        // Lock the schedule row for the duration of the transaction; the
        // available_seats decrement at the end relies on this
        let schedule = sqlx::query_as::<_, Schedule>(
            "SELECT id, bus_id, route_id, journey_date, departure_time, arrival_time,
                    fare, available_seats, status
             FROM bus_schedules WHERE id = ? FOR UPDATE",
        )
        .bind(request.schedule_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Schedule not found".into()))?;

        if schedule.status != ScheduleStatus::Active {
            return Err(AppError::Unprocessable(
                "Schedule is no longer active".into(),
            ));
        }

        let total_amount = schedule.fare * Decimal::from(seat_count as u32);

        // A rejected coupon aborts the booking; the client retries without
        // the code. No silent fallback to a zero discount
        let quote = match request.coupon_code.as_deref() {
            Some(code) => Some(CouponService::redeem_coupon(&mut tx, code, total_amount).await?),
            None => None,
        };
        let discount_amount = quote
            .as_ref()
            .map(|q| q.discount_amount)
            .unwrap_or(Decimal::ZERO);
        let final_amount = total_amount - discount_amount;

        let user_id = UserService::find_or_create_guest(
            &mut tx,
            &request.passenger_name,
            &request.passenger_phone,
            request.passenger_email.as_deref(),
        )
        .await?;

        let inserted = sqlx::query(
            "INSERT INTO bookings
             (user_id, schedule_id, passenger_name, passenger_phone, passenger_email,
              total_amount, discount_amount, final_amount, booking_status)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(schedule.id)
        .bind(&request.passenger_name)
        .bind(&request.passenger_phone)
        .bind(&request.passenger_email)
        .bind(total_amount)
        .bind(discount_amount)
        .bind(final_amount)
        .bind(BookingStatus::Confirmed.to_string())
        .execute(&mut *tx)
        .await?;
        let booking_id = inserted.last_insert_id() as i32;

        SeatService::materialize_seats(&mut tx, schedule.id).await?;
        let seat_ids =
            SeatService::reserve_seats(&mut tx, schedule.id, &request.selected_seats).await?;

        for seat_id in &seat_ids {
            sqlx::query("INSERT INTO booking_seats (booking_id, seat_id) VALUES (?, ?)")
                .bind(booking_id)
                .bind(seat_id)
                .execute(&mut *tx)
                .await?;
        }

        // Guarded decrement keeps 0 <= available_seats at all times
        let updated = sqlx::query(
            "UPDATE bus_schedules SET available_seats = available_seats - ?
             WHERE id = ? AND available_seats >= ?",
        )
        .bind(seat_count as i64)
        .bind(schedule.id)
        .bind(seat_count as i64)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Not enough seats left on this schedule".into(),
            ));
        }

        tx.commit().await?;

        info!(
            "booking {} confirmed on schedule {}: {} seat(s), final amount {}",
            booking_id, schedule.id, seat_count, final_amount
        );

        Ok(BookingResponse {
            booking_id,
            total_amount,
            discount_amount,
            final_amount,
            selected_seats: request.selected_seats,
        })
    }

    // Every seat number must sit on the fixed grid, with no duplicates in
    // the selection. Runs before the transaction opens
    fn validate_seat_selection(selected_seats: &[String]) -> AppResult<()> {
        let mut seen = HashSet::new();
        for seat_number in selected_seats {
            if parse_seat_number(seat_number).is_none() {
                return Err(AppError::ValidationError(format!(
                    "Invalid seat number: {}",
                    seat_number
                )));
            }
            if !seen.insert(seat_number.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate seat number: {}",
                    seat_number
                )));
            }
        }
        Ok(())
    }

    // Booking summaries for the dashboard, newest first
    pub async fn list_bookings(&self) -> AppResult<Vec<BookingSummary>> {
        let bookings = sqlx::query_as::<_, BookingSummary>(
            "SELECT
                b.id,
                b.passenger_name,
                b.passenger_phone,
                b.passenger_email,
                b.total_amount,
                b.discount_amount,
                b.final_amount,
                b.booking_status,
                b.booking_date,
                CONCAT(r.from_location, ' - ', r.to_location) as route,
                GROUP_CONCAT(s.seat_number ORDER BY s.seat_row, s.seat_column SEPARATOR ', ') as seats
             FROM bookings b
             LEFT JOIN bus_schedules bs ON b.schedule_id = bs.id
             LEFT JOIN routes r ON bs.route_id = r.id
             LEFT JOIN booking_seats bks ON b.id = bks.booking_id
             LEFT JOIN seats s ON bks.seat_id = s.id
             GROUP BY b.id
             ORDER BY b.booking_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn update_booking_status(&self, booking_id: i32, status: &str) -> AppResult<()> {
        let status = BookingStatus::from_str(status).map_err(|_| {
            AppError::ValidationError(
                "Invalid status. Must be pending, confirmed, cancelled or completed".into(),
            )
        })?;

        let updated = sqlx::query("UPDATE bookings SET booking_status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(booking_id)
            .execute(&self.pool)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }

        Ok(())
    }

    // Remove a booking and its seat links. Seat status is left untouched;
    // freeing seats is a separate admin concern
    pub async fn delete_booking(&self, booking_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM booking_seats WHERE booking_id = ?")
            .bind(booking_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(booking_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }

        tx.commit().await?;

        Ok(())
    }
}
