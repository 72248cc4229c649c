use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// The part of an admin account that is safe to hand to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&AdminUser> for PublicUser {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

impl AdminUser {
    #[inline]
    pub fn select_query() -> &'static str {
        include_str!("../../../../SQL/admin_users/select_base.sql")
    }

    #[inline]
    pub fn insert_query() -> &'static str {
        include_str!("../../../../SQL/admin_users/insert.sql")
    }

    #[inline]
    pub fn insert_or_ignore_query() -> &'static str {
        include_str!("../../../../SQL/admin_users/insert_or_ignore.sql")
    }
}
