pub mod booking_service;
pub mod coupon_service;
pub mod schedule_service;
pub mod seat_service;
pub mod user_service;
