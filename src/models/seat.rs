use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

// Fixed seat layout: 10 rows (A-J) by 4 columns, 40 seats per schedule
pub const SEAT_ROWS: [char; 10] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];
pub const SEAT_COLUMNS: [i32; 4] = [1, 2, 3, 4];
pub const SEATS_PER_SCHEDULE: usize = SEAT_ROWS.len() * SEAT_COLUMNS.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type, Display)]
#[sqlx(type_name = "ENUM")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SeatStatus {
    #[sqlx(rename = "available")]
    Available,
    #[sqlx(rename = "booked")]
    Booked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type, Display)]
#[sqlx(type_name = "ENUM")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SeatType {
    #[sqlx(rename = "window")]
    Window,
    #[sqlx(rename = "aisle")]
    Aisle,
}

// One position in the fixed grid, before it exists as a database row
#[derive(Debug, Clone)]
pub struct GridSeat {
    pub seat_number: String,
    pub seat_row: i32,
    pub seat_column: i32,
    pub seat_type: SeatType,
}

/// The full 40-seat layout in row-major order (A1, A2, ... J4).
pub fn seat_grid() -> Vec<GridSeat> {
    let mut grid = Vec::with_capacity(SEATS_PER_SCHEDULE);
    for (row_index, row_letter) in SEAT_ROWS.iter().enumerate() {
        for &column in SEAT_COLUMNS.iter() {
            grid.push(GridSeat {
                seat_number: format!("{}{}", row_letter, column),
                seat_row: row_index as i32 + 1,
                seat_column: column,
                seat_type: seat_type_for_column(column),
            });
        }
    }
    grid
}

// Columns 1 and 4 sit against the windows, 2 and 3 on the aisle
pub fn seat_type_for_column(column: i32) -> SeatType {
    if column == 1 || column == 4 {
        SeatType::Window
    } else {
        SeatType::Aisle
    }
}

/// Parse a seat number like "C3" into its (row, column) grid position.
/// Returns None for anything outside the fixed A-J / 1-4 layout.
pub fn parse_seat_number(seat_number: &str) -> Option<(i32, i32)> {
    let mut chars = seat_number.chars();
    let row_letter = chars.next()?;
    let column_digit = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let row = SEAT_ROWS.iter().position(|&r| r == row_letter)? as i32 + 1;
    let column = column_digit.to_digit(10)? as i32;
    if !SEAT_COLUMNS.contains(&column) {
        return None;
    }

    Some((row, column))
}

// Per-seat row in the seat map response
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct SeatDetail {
    pub id: i32,
    pub seat_number: String,
    pub seat_row: i32,
    pub seat_column: i32,
    pub seat_type: SeatType,
    pub status: SeatStatus,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SeatMapResponse {
    pub schedule_id: i32,
    pub seats: Vec<SeatDetail>,
}
