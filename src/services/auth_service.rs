use bcrypt::{hash, verify};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use crate::{
    db::enums::UserRole,
    db::models::user::{AuthUser, LoginRequest, LoginResponse, NewUser, RegisterRequest, User, UserProfile},
    db::repositories::users::UserRepo,
    error::AppError,
    middleware::auth::JwtService,
};

pub struct AuthService;

impl AuthService {
    /// Creates an account with a bcrypt hash. Emails are stored lower-cased.
    pub fn create_user(
        conn: &mut PgConnection,
        email: &str,
        name: &str,
        password: &str,
        role: UserRole,
        bcrypt_cost: u32,
    ) -> Result<User, AppError> {
        let email = email.trim().to_lowercase();

        // Check if email already exists
        if UserRepo::exists_by_email(conn, &email)? {
            return Err(AppError::conflict_with_code(
                "Email already exists",
                Some("email".to_string()),
                "USER_EMAIL_EXISTS",
            ));
        }

        let password_hash = hash(password, bcrypt_cost)?;
        let new_user = NewUser {
            email,
            name: name.trim().to_string(),
            password_hash,
            role,
        };

        let user = UserRepo::insert(conn, &new_user).map_err(|e| match e {
            // 并发注册时由唯一索引兜底
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                AppError::conflict_with_code(
                    "Email already exists",
                    Some("email".to_string()),
                    "USER_EMAIL_EXISTS",
                )
            }
            other => other.into(),
        })?;
        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Self-service sign up always yields a `user` account.
    pub fn register(
        conn: &mut PgConnection,
        req: &RegisterRequest,
        bcrypt_cost: u32,
    ) -> Result<UserProfile, AppError> {
        let user = Self::create_user(conn, &req.email, &req.name, &req.password, UserRole::User, bcrypt_cost)?;
        Ok(user.into())
    }

    pub fn login(
        conn: &mut PgConnection,
        jwt: &JwtService,
        req: &LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let user = UserRepo::find_by_email(conn, req.email.trim())?
            .ok_or_else(|| AppError::auth("Invalid email or password"))?;

        if !verify(&req.password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Rejected login with wrong password");
            return Err(AppError::auth("Invalid email or password"));
        }

        if !user.is_active {
            return Err(AppError::auth("Account is deactivated"));
        }

        let auth_user = AuthUser {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        };
        let access_token = jwt.generate_access_token(&auth_user)?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt.expires_in(),
            user: user.into(),
        })
    }

    pub fn get_profile(conn: &mut PgConnection, user_id: Uuid) -> Result<UserProfile, AppError> {
        let user = UserRepo::find_by_id(conn, user_id)?
            .ok_or_else(|| AppError::not_found("User"))?;
        Ok(user.into())
    }
}
