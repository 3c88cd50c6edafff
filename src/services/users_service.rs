use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::UserRole,
    db::models::user::{AuthUser, UserProfile},
    db::repositories::users::UserRepo,
    error::AppError,
};

pub struct UsersService;

impl UsersService {
    pub fn list(conn: &mut PgConnection) -> Result<Vec<UserProfile>, AppError> {
        Ok(UserRepo::list(conn)?.into_iter().map(UserProfile::from).collect())
    }

    /// A super admin may not lock themselves out.
    fn ensure_not_self(actor: &AuthUser, target: Uuid, action: &str) -> Result<(), AppError> {
        if actor.id == target {
            return Err(AppError::validation(format!("You cannot {} your own account", action)));
        }
        Ok(())
    }

    pub fn update_role(
        conn: &mut PgConnection,
        actor: &AuthUser,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<UserProfile, AppError> {
        if role != UserRole::SuperAdmin {
            Self::ensure_not_self(actor, user_id, "demote")?;
        }
        let user = UserRepo::update_role(conn, user_id, role)?
            .ok_or_else(|| AppError::not_found("User"))?;
        tracing::info!(actor = %actor.id, user_id = %user.id, role = %role, "User role changed");
        Ok(user.into())
    }

    pub fn set_active(
        conn: &mut PgConnection,
        actor: &AuthUser,
        user_id: Uuid,
        active: bool,
    ) -> Result<UserProfile, AppError> {
        if !active {
            Self::ensure_not_self(actor, user_id, "deactivate")?;
        }
        let user = UserRepo::update_active(conn, user_id, active)?
            .ok_or_else(|| AppError::not_found("User"))?;
        tracing::info!(actor = %actor.id, user_id = %user.id, active, "User activation changed");
        Ok(user.into())
    }

    pub fn delete(conn: &mut PgConnection, actor: &AuthUser, user_id: Uuid) -> Result<(), AppError> {
        Self::ensure_not_self(actor, user_id, "delete")?;
        if UserRepo::delete(conn, user_id)? == 0 {
            return Err(AppError::not_found("User"));
        }
        tracing::info!(actor = %actor.id, user_id = %user_id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "root@example.com".to_string(),
            name: "Root".to_string(),
            role: UserRole::SuperAdmin,
        }
    }

    #[test]
    fn test_self_guard() {
        let me = actor();
        assert!(UsersService::ensure_not_self(&me, me.id, "delete").is_err());
        assert!(UsersService::ensure_not_self(&me, Uuid::new_v4(), "delete").is_ok());
    }
}
