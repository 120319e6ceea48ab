use crate::models::seat::{seat_grid, SeatDetail, SeatMapResponse, SeatStatus};
use crate::utils::error::{AppError, AppResult};
use sqlx::mysql::MySqlConnection;
use sqlx::MySqlPool;

#[derive(Clone)]
pub struct SeatService {
    pool: MySqlPool,
}

impl SeatService {
    pub fn new(pool: MySqlPool) -> Self {
        SeatService { pool }
    }

    /// Insert the fixed 40-seat grid for a schedule. Idempotent: the
    /// UNIQUE (schedule_id, seat_number) key makes re-runs no-ops, so the
    /// seat count never grows past the grid size.
    pub async fn materialize_seats(
        conn: &mut MySqlConnection,
        schedule_id: i32,
    ) -> AppResult<()> {
        for seat in seat_grid() {
            sqlx::query(
                "INSERT IGNORE INTO seats
                 (schedule_id, seat_number, seat_row, seat_column, seat_type, status)
                 VALUES (?, ?, ?, ?, ?, 'available')",
            )
            .bind(schedule_id)
            .bind(&seat.seat_number)
            .bind(seat.seat_row)
            .bind(seat.seat_column)
            .bind(seat.seat_type.to_string())
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    // Full per-seat status grid for a schedule, creating the seat rows on
    // first access
    pub async fn get_seat_map(&self, schedule_id: i32) -> AppResult<SeatMapResponse> {
        let schedule_exists: Option<i32> =
            sqlx::query_scalar("SELECT id FROM bus_schedules WHERE id = ?")
                .bind(schedule_id)
                .fetch_optional(&self.pool)
                .await?;

        if schedule_exists.is_none() {
            return Err(AppError::NotFound("Schedule not found".into()));
        }

        let mut seats = self.fetch_seats(schedule_id).await?;

        // Lazy population: the grid is created the first time anyone looks
        // at this schedule's seats
        if seats.is_empty() {
            let mut tx = self.pool.begin().await?;
            Self::materialize_seats(&mut tx, schedule_id).await?;
            tx.commit().await?;

            seats = self.fetch_seats(schedule_id).await?;
        }

        Ok(SeatMapResponse { schedule_id, seats })
    }

    async fn fetch_seats(&self, schedule_id: i32) -> AppResult<Vec<SeatDetail>> {
        let seats = sqlx::query_as::<_, SeatDetail>(
            "SELECT id, seat_number, seat_row, seat_column, seat_type, status
             FROM seats
             WHERE schedule_id = ?
             ORDER BY seat_row, seat_column",
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(seats)
    }

    /// Claim every requested seat for the surrounding booking transaction,
    /// returning the claimed seat ids in request order.
    ///
    /// Each claim is an update-with-precondition: the UPDATE only matches a
    /// row that is still available, and a zero affected-row count means a
    /// concurrent booking got there first. The first conflicting seat aborts
    /// the whole set; the caller's rollback undoes any earlier claims.
    pub async fn reserve_seats(
        conn: &mut MySqlConnection,
        schedule_id: i32,
        seat_numbers: &[String],
    ) -> AppResult<Vec<i32>> {
        let mut seat_ids = Vec::with_capacity(seat_numbers.len());

        for seat_number in seat_numbers {
            let seat_id: Option<i32> = sqlx::query_scalar(
                "SELECT id FROM seats WHERE schedule_id = ? AND seat_number = ?",
            )
            .bind(schedule_id)
            .bind(seat_number)
            .fetch_optional(&mut *conn)
            .await?;

            let seat_id = seat_id.ok_or_else(|| {
                AppError::Conflict(format!("Seat {} is not available", seat_number))
            })?;

            let updated = sqlx::query(
                "UPDATE seats SET status = ? WHERE id = ? AND status = 'available'",
            )
            .bind(SeatStatus::Booked.to_string())
            .bind(seat_id)
            .execute(&mut *conn)
            .await?;

            if updated.rows_affected() == 0 {
                return Err(AppError::Conflict(format!(
                    "Seat {} is not available",
                    seat_number
                )));
            }

            seat_ids.push(seat_id);
        }

        Ok(seat_ids)
    }
}
