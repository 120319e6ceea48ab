use crate::models::route::BusRoute;
use crate::models::schedule::ScheduleDetail;
use crate::utils::error::{AppError, AppResult};
use chrono::NaiveDate;
use sqlx::MySqlPool;

const SCHEDULE_DETAIL_COLUMNS: &str = "
    bs.id,
    bs.journey_date,
    bs.departure_time,
    bs.arrival_time,
    bs.fare,
    bs.available_seats,
    b.bus_name,
    b.bus_number,
    b.bus_type,
    b.total_seats,
    r.from_location,
    r.to_location,
    r.distance_km";

#[derive(Clone)]
pub struct ScheduleService {
    pool: MySqlPool,
}

impl ScheduleService {
    pub fn new(pool: MySqlPool) -> Self {
        ScheduleService { pool }
    }

    pub async fn list_routes(&self) -> AppResult<Vec<BusRoute>> {
        let routes = sqlx::query_as::<_, BusRoute>(
            "SELECT id, from_location, to_location, distance_km, duration_minutes
             FROM routes
             ORDER BY from_location, to_location",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    // Active schedules departing on or after the given date, optionally
    // narrowed to one route
    pub async fn search_schedules(
        &self,
        route_id: Option<i32>,
        from_date: NaiveDate,
    ) -> AppResult<Vec<ScheduleDetail>> {
        let mut sql = format!(
            "SELECT {SCHEDULE_DETAIL_COLUMNS}
             FROM bus_schedules bs
             JOIN buses b ON bs.bus_id = b.id
             JOIN routes r ON bs.route_id = r.id
             WHERE bs.status = 'active'
             AND bs.journey_date >= ?"
        );
        if route_id.is_some() {
            sql.push_str(" AND bs.route_id = ?");
        }
        sql.push_str(" ORDER BY bs.journey_date, bs.departure_time");

        let mut query = sqlx::query_as::<_, ScheduleDetail>(&sql).bind(from_date);
        if let Some(route_id) = route_id {
            query = query.bind(route_id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    pub async fn get_schedule_detail(&self, schedule_id: i32) -> AppResult<ScheduleDetail> {
        let sql = format!(
            "SELECT {SCHEDULE_DETAIL_COLUMNS}
             FROM bus_schedules bs
             JOIN buses b ON bs.bus_id = b.id
             JOIN routes r ON bs.route_id = r.id
             WHERE bs.id = ?"
        );

        sqlx::query_as::<_, ScheduleDetail>(&sql)
            .bind(schedule_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Schedule not found".into()))
    }
}
