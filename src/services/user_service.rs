use crate::models::user::{
    User, UserLoginRequest, UserLoginResponse, UserRegistrationRequest,
};
use crate::utils::error::{AppError, AppResult};
use crate::utils::jwt;
use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::mysql::MySqlConnection;
use sqlx::MySqlPool;
use validator::Validate;

#[derive(Clone)]
pub struct UserService {
    pool: MySqlPool,
}

impl UserService {
    pub fn new(pool: MySqlPool) -> Self {
        UserService { pool }
    }

    // Register a new account with a usable login
    pub async fn register_user(&self, request: UserRegistrationRequest) -> AppResult<i32> {
        request.validate()?;

        // Check if the email is already registered
        let existing_user: Option<i32> =
            sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
                .bind(&request.email)
                .fetch_optional(&self.pool)
                .await?;

        if existing_user.is_some() {
            return Err(AppError::Conflict("Email already registered".into()));
        }

        // Hash password
        let hashed_password = hash(request.password.as_bytes(), DEFAULT_COST)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO users (name, email, phone, password) VALUES (?, ?, ?, ?)",
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&hashed_password)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i32)
    }

    // Login with email and password
    pub async fn login_user(&self, request: UserLoginRequest) -> AppResult<UserLoginResponse> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, phone, password FROM users WHERE email = ?",
        )
        .bind(&request.email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid email or password".into()))?;

        // Guest records created during booking have no password and cannot log in
        let stored_hash = user
            .password
            .as_deref()
            .ok_or_else(|| AppError::AuthError("Invalid email or password".into()))?;

        let password_matches = verify(request.password.as_bytes(), stored_hash)
            .map_err(|e| AppError::AuthError(e.to_string()))?;

        if !password_matches {
            return Err(AppError::AuthError("Invalid email or password".into()));
        }

        let token = jwt::generate_token(user.id)
            .map_err(|e| AppError::AuthError(e.to_string()))?;

        Ok(UserLoginResponse {
            token,
            user_id: user.id,
            name: user.name,
        })
    }

    /// Resolve the passenger to a user row inside the booking transaction.
    ///
    /// Phone number is the natural key for guest identity: two bookings with
    /// the same phone always map to the same user after the first. When no
    /// row matches, a guest record is inserted with a NULL password.
    pub async fn find_or_create_guest(
        conn: &mut MySqlConnection,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> AppResult<i32> {
        let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM users WHERE phone = ?")
            .bind(phone)
            .fetch_optional(&mut *conn)
            .await?;

        if let Some(user_id) = existing {
            return Ok(user_id);
        }

        let result = sqlx::query("INSERT INTO users (name, email, phone) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(phone)
            .execute(&mut *conn)
            .await?;

        Ok(result.last_insert_id() as i32)
    }
}
