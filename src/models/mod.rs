pub mod booking;
pub mod bus;
pub mod coupon;
pub mod route;
pub mod schedule;
pub mod seat;
pub mod user;
