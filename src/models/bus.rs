use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

// Bus category as stored in the `bus_type` ENUM column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type, Display)]
#[sqlx(type_name = "ENUM")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BusType {
    #[sqlx(rename = "ac")]
    Ac,
    #[sqlx(rename = "non_ac")]
    NonAc,
    #[sqlx(rename = "sleeper")]
    Sleeper,
    #[sqlx(rename = "double_decker")]
    DoubleDecker,
}

#[allow(dead_code)]
#[derive(Debug, sqlx::FromRow)]
pub struct Bus {
    pub id: i32,
    pub bus_name: String,
    pub bus_number: String,
    pub bus_type: BusType,
    pub total_seats: i32,
    pub operator_name: String,
}
