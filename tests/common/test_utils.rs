use chrono::{Duration, Utc};
use dotenv::dotenv;
use once_cell::sync::OnceCell;
use rust_decimal::Decimal;
use sqlx::mysql::MySqlPool as Pool;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::Error;
use std::env;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

static TEST_DB: OnceCell<Mutex<Option<TestDb>>> = OnceCell::new();
static DB_NAME: OnceCell<String> = OnceCell::new();

#[derive(Debug)]
pub struct TestDb {
    pub pool: Pool,
    pub db_name: String,
}

fn configured_database_url() -> Option<String> {
    dotenv().ok();
    env::var("ADMIN_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .ok()
}

// Connect to the server without selecting a database, used to create and
// drop the per-run test database
async fn create_connection_pool_without_db(db_url: &str) -> Result<Pool, Error> {
    let base_url = db_url.split('/').collect::<Vec<&str>>()[..3].join("/");

    MySqlPoolOptions::new()
        .max_connections(10)
        .connect(&base_url)
        .await
}

async fn create_connection_pool_with_db(db_url: &str, db_name: &str) -> Result<Pool, Error> {
    let base_url = db_url.split('/').collect::<Vec<&str>>()[..3].join("/");

    MySqlPoolOptions::new()
        .max_connections(10)
        .connect(&format!("{}/{}", base_url, db_name))
        .await
}

impl TestDb {
    /// Pool for the shared per-run test database, created on first call.
    ///
    /// Returns None when neither ADMIN_DATABASE_URL nor DATABASE_URL is set
    /// so that database-backed suites skip instead of failing on machines
    /// without a MySQL server.
    pub async fn acquire() -> Result<Option<Pool>, Error> {
        let Some(db_url) = configured_database_url() else {
            eprintln!("skipping database test: DATABASE_URL is not set");
            return Ok(None);
        };

        let test_db = TEST_DB.get_or_init(|| Mutex::new(None));
        let mut guard = test_db.lock().await;

        // Only create one database for all tests in one run
        if let Some(db) = guard.as_ref() {
            return Ok(Some(db.pool.clone()));
        }

        let db = Self::setup_database(&db_url).await?;
        let pool = db.pool.clone();
        *guard = Some(db);
        Ok(Some(pool))
    }

    async fn setup_database(db_url: &str) -> Result<Self, Error> {
        // Unique database name per test binary; the pid keeps concurrently
        // launched binaries from colliding on the same timestamp
        let db_name = DB_NAME
            .get_or_init(|| {
                let timestamp = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap()
                    .as_secs();
                format!("bus_booking_test_{}_{}", timestamp, std::process::id())
            })
            .clone();

        let admin_pool = create_connection_pool_without_db(db_url).await?;

        sqlx::query(&format!("CREATE DATABASE {}", db_name))
            .execute(&admin_pool)
            .await?;

        let pool = create_connection_pool_with_db(db_url, &db_name).await?;
        Self::create_tables(&pool).await?;
        Self::insert_initial_data(&pool).await?;

        Ok(Self { pool, db_name })
    }

    async fn create_tables(pool: &Pool) -> Result<(), Error> {
        let tables = vec![
            "CREATE TABLE IF NOT EXISTS routes (
                id INT AUTO_INCREMENT PRIMARY KEY,
                from_location VARCHAR(100) NOT NULL,
                to_location VARCHAR(100) NOT NULL,
                distance_km DECIMAL(8,2) NOT NULL,
                duration_minutes INT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS buses (
                id INT AUTO_INCREMENT PRIMARY KEY,
                bus_name VARCHAR(100) NOT NULL,
                bus_number VARCHAR(50) NOT NULL,
                bus_type ENUM('ac', 'non_ac', 'sleeper', 'double_decker') NOT NULL,
                total_seats INT NOT NULL,
                operator_name VARCHAR(100) NOT NULL,
                CONSTRAINT buses_bus_number_uindex UNIQUE (bus_number)
            )",
            "CREATE TABLE IF NOT EXISTS bus_schedules (
                id INT AUTO_INCREMENT PRIMARY KEY,
                bus_id INT NOT NULL,
                route_id INT NOT NULL,
                journey_date DATE NOT NULL,
                departure_time TIME NOT NULL,
                arrival_time TIME NOT NULL,
                fare DECIMAL(10,2) NOT NULL,
                available_seats INT NOT NULL,
                status ENUM('active', 'cancelled') DEFAULT 'active' NOT NULL,
                CONSTRAINT bus_schedules_bus_id_fk
                    FOREIGN KEY (bus_id) REFERENCES buses(id),
                CONSTRAINT bus_schedules_route_id_fk
                    FOREIGN KEY (route_id) REFERENCES routes(id)
            )",
            "CREATE TABLE IF NOT EXISTS seats (
                id INT AUTO_INCREMENT PRIMARY KEY,
                schedule_id INT NOT NULL,
                seat_number VARCHAR(4) NOT NULL,
                seat_row INT NOT NULL,
                seat_column INT NOT NULL,
                seat_type ENUM('window', 'aisle') NOT NULL,
                status ENUM('available', 'booked') DEFAULT 'available' NOT NULL,
                CONSTRAINT seats_schedule_seat_uindex
                    UNIQUE (schedule_id, seat_number),
                CONSTRAINT seats_schedule_id_fk
                    FOREIGN KEY (schedule_id) REFERENCES bus_schedules(id)
                    ON DELETE CASCADE
            )",
            "CREATE TABLE IF NOT EXISTS users (
                id INT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                email VARCHAR(255) NULL,
                phone VARCHAR(20) NOT NULL,
                password VARCHAR(255) NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP NOT NULL,
                CONSTRAINT users_email_uindex UNIQUE (email)
            )",
            "CREATE TABLE IF NOT EXISTS coupons (
                id INT AUTO_INCREMENT PRIMARY KEY,
                coupon_code VARCHAR(50) NOT NULL,
                discount_percentage DECIMAL(5,2) NOT NULL,
                max_discount_amount DECIMAL(10,2) NULL,
                min_booking_amount DECIMAL(10,2) DEFAULT 0.00 NOT NULL,
                valid_from DATE NOT NULL,
                valid_until DATE NOT NULL,
                usage_limit INT NOT NULL,
                used_count INT DEFAULT 0 NOT NULL,
                status ENUM('active', 'inactive') DEFAULT 'active' NOT NULL,
                CONSTRAINT coupons_coupon_code_uindex UNIQUE (coupon_code)
            )",
            "CREATE TABLE IF NOT EXISTS bookings (
                id INT AUTO_INCREMENT PRIMARY KEY,
                user_id INT NOT NULL,
                schedule_id INT NOT NULL,
                passenger_name VARCHAR(100) NOT NULL,
                passenger_phone VARCHAR(20) NOT NULL,
                passenger_email VARCHAR(255) NULL,
                total_amount DECIMAL(10,2) NOT NULL,
                discount_amount DECIMAL(10,2) DEFAULT 0.00 NOT NULL,
                final_amount DECIMAL(10,2) NOT NULL,
                booking_status ENUM('pending', 'confirmed', 'cancelled', 'completed')
                    DEFAULT 'confirmed' NOT NULL,
                booking_date DATETIME DEFAULT CURRENT_TIMESTAMP NOT NULL,
                CONSTRAINT bookings_user_id_fk
                    FOREIGN KEY (user_id) REFERENCES users(id),
                CONSTRAINT bookings_schedule_id_fk
                    FOREIGN KEY (schedule_id) REFERENCES bus_schedules(id)
            )",
            "CREATE TABLE IF NOT EXISTS booking_seats (
                id INT AUTO_INCREMENT PRIMARY KEY,
                booking_id INT NOT NULL,
                seat_id INT NOT NULL,
                CONSTRAINT booking_seats_booking_id_fk
                    FOREIGN KEY (booking_id) REFERENCES bookings(id),
                CONSTRAINT booking_seats_seat_id_fk
                    FOREIGN KEY (seat_id) REFERENCES seats(id)
            )",
        ];

        for create_sql in tables {
            sqlx::query(create_sql).execute(pool).await?;
        }

        Ok(())
    }

    async fn insert_initial_data(pool: &Pool) -> Result<(), Error> {
        let rows = vec![
            "INSERT INTO routes (from_location, to_location, distance_km, duration_minutes)
             VALUES ('Dhaka', 'Chittagong', 245.50, 360)",
            "INSERT INTO routes (from_location, to_location, distance_km, duration_minutes)
             VALUES ('Dhaka', 'Sylhet', 235.00, 330)",
            "INSERT INTO routes (from_location, to_location, distance_km, duration_minutes)
             VALUES ('Dhaka', 'Khulna', 270.75, 420)",
            "INSERT INTO buses (bus_name, bus_number, bus_type, total_seats, operator_name)
             VALUES ('Green Line Express', 'GL-1122', 'ac', 40, 'Green Line Paribahan')",
            "INSERT INTO buses (bus_name, bus_number, bus_type, total_seats, operator_name)
             VALUES ('Shyamoli Deluxe', 'SH-2244', 'non_ac', 40, 'Shyamoli NR')",
            "INSERT INTO buses (bus_name, bus_number, bus_type, total_seats, operator_name)
             VALUES ('Hanif Sleeper Coach', 'HF-3366', 'sleeper', 40, 'Hanif Enterprise')",
        ];

        for insert_sql in rows {
            sqlx::query(insert_sql).execute(pool).await?;
        }

        Ok(())
    }

    // Fresh active schedule on the seeded Dhaka-Chittagong route, two weeks
    // out, with a full 40-seat inventory
    pub async fn insert_schedule(pool: &Pool, fare: Decimal) -> Result<i32, Error> {
        let journey_date = Utc::now().date_naive() + Duration::days(14);

        let result = sqlx::query(
            "INSERT INTO bus_schedules
             (bus_id, route_id, journey_date, departure_time, arrival_time,
              fare, available_seats, status)
             VALUES (1, 1, ?, '08:30:00', '14:30:00', ?, 40, 'active')",
        )
        .bind(journey_date)
        .bind(fare)
        .execute(pool)
        .await?;

        Ok(result.last_insert_id() as i32)
    }

    pub async fn insert_coupon(
        pool: &Pool,
        code: &str,
        discount_percentage: Decimal,
        max_discount_amount: Option<Decimal>,
        min_booking_amount: Decimal,
        usage_limit: i32,
    ) -> Result<i32, Error> {
        let today = Utc::now().date_naive();

        let result = sqlx::query(
            "INSERT INTO coupons
             (coupon_code, discount_percentage, max_discount_amount, min_booking_amount,
              valid_from, valid_until, usage_limit, status)
             VALUES (?, ?, ?, ?, ?, ?, ?, 'active')",
        )
        .bind(code)
        .bind(discount_percentage)
        .bind(max_discount_amount)
        .bind(min_booking_amount)
        .bind(today - Duration::days(1))
        .bind(today + Duration::days(30))
        .bind(usage_limit)
        .execute(pool)
        .await?;

        Ok(result.last_insert_id() as i32)
    }

    // Teardown: drop the database after the test run (not after each test)
    pub async fn cleanup_database() -> Result<(), Error> {
        if let Some(test_db) = TEST_DB.get() {
            if let Some(db) = test_db.lock().await.take() {
                let Some(db_url) = configured_database_url() else {
                    return Ok(());
                };
                let admin_pool = create_connection_pool_without_db(&db_url).await?;
                sqlx::query(&format!("DROP DATABASE IF EXISTS {}", db.db_name))
                    .execute(&admin_pool)
                    .await?;
            }
        }
        Ok(())
    }

    // Called from #[dtor] hooks, which run outside any async runtime
    pub fn cleanup_database_sync() -> Result<(), Error> {
        if TEST_DB.get().is_none() {
            return Ok(());
        }
        match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime.block_on(Self::cleanup_database()),
            Err(e) => {
                eprintln!("failed to build cleanup runtime: {}", e);
                Ok(())
            }
        }
    }
}
