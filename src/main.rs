#[macro_use]
extern crate rocket;
extern crate rocket_okapi;

use bus_booking_system::db::Database;
use bus_booking_system::routes;
use bus_booking_system::services::{
    booking_service::BookingService, coupon_service::CouponService,
    schedule_service::ScheduleService, seat_service::SeatService, user_service::UserService,
};
use bus_booking_system::swagger::swagger_ui;
use dotenv::dotenv;
use rocket::fairing::AdHoc;
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::*;

#[launch]
async fn rocket() -> _ {
    dotenv().ok();

    // Connect to the database
    let database =
        Database::new(&std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"))
            .await
            .expect("Failed to connect to database");
    let pool = database.get_pool().clone();

    let user_service = UserService::new(pool.clone());
    let schedule_service = ScheduleService::new(pool.clone());
    let seat_service = SeatService::new(pool.clone());
    let coupon_service = CouponService::new(pool.clone());
    let booking_service = BookingService::new(pool.clone());

    rocket::build()
        .manage(user_service)
        .manage(schedule_service)
        .manage(seat_service)
        .manage(coupon_service)
        .manage(booking_service)
        .mount(
            "/api",
            openapi_get_routes![
                routes::user_route::register,
                routes::user_route::login,
                routes::schedule_route::list_routes,
                routes::schedule_route::search_schedules,
                routes::schedule_route::get_seat_map,
                routes::coupon_route::validate_coupon,
                routes::coupon_route::list_coupons,
                routes::coupon_route::create_coupon,
                routes::coupon_route::delete_coupon,
                routes::booking_route::create_booking,
                routes::booking_route::list_bookings,
                routes::booking_route::update_booking_status,
                routes::booking_route::delete_booking,
            ],
        )
        .mount("/swagger", make_swagger_ui(&swagger_ui()))
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        }))
}
