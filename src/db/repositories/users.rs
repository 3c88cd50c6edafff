use chrono::Utc;
use diesel::prelude::*;

use crate::db::enums::UserRole;
use crate::db::models::user::{NewUser, User};

pub struct UserRepo;

impl UserRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.filter(id.eq(user_id)).first::<User>(conn).optional()
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        user_email: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(email.eq(user_email.to_lowercase()))
            .first::<User>(conn)
            .optional()
    }

    pub fn exists_by_email(
        conn: &mut PgConnection,
        user_email: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(
            users.filter(email.eq(user_email.to_lowercase())),
        ))
        .get_result(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        diesel::insert_into(crate::schema::users::table)
            .values(new_user)
            .get_result(conn)
    }

    pub fn list(conn: &mut PgConnection) -> Result<Vec<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.order(created_at.asc()).load::<User>(conn)
    }

    pub fn update_role(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
        new_role: UserRole,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(user_id)))
            .set((role.eq(new_role), updated_at.eq(Utc::now())))
            .get_result(conn)
            .optional()
    }

    pub fn update_active(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
        active: bool,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(user_id)))
            .set((is_active.eq(active), updated_at.eq(Utc::now())))
            .get_result(conn)
            .optional()
    }

    pub fn delete(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::delete(users.filter(id.eq(user_id))).execute(conn)
    }
}
