use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct BusRoute {
    pub id: i32,
    pub from_location: String,
    pub to_location: String,
    pub distance_km: Decimal,
    pub duration_minutes: i32,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct RouteListResponse {
    pub routes: Vec<BusRoute>,
}
