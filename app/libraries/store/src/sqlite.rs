use crate::{AdminUserStore, ChatLogStore, QaStore};
use app_error::AppError;
use app_schema::{
    auth::users::AdminUser,
    chat_log::{ChatLog, MessageFrequency, NewChatLog},
    qa::{NewQaPair, QaPair},
};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::*;

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (or creates) the database at `url` and runs pending migrations.
    ///
    /// `sqlite::memory:` gets a single never-recycled connection, since every
    /// connection to an in-memory database sees its own empty database.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, AppError> {
        info!("Connecting to SQLite database: {}", url);
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };
        let pool = pool_options.connect_with(options).await?;
        sqlx::migrate!("../../SQL/migrations").run(&pool).await?;
        info!("SQLite database ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl QaStore for SqliteStore {
    async fn list_qa_pairs(&self) -> Result<Vec<QaPair>, AppError> {
        let res = sqlx::query_as::<_, QaPair>(&format!("{} ORDER BY id ASC", QaPair::select_base()))
            .fetch_all(&self.pool)
            .await?;
        Ok(res)
    }

    async fn insert_qa_pair(&self, qa: &NewQaPair) -> Result<i64, AppError> {
        let id = sqlx::query(QaPair::insert())
            .bind(&qa.question)
            .bind(&qa.keywords)
            .bind(&qa.answer)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        debug!("INSERT qa_pair {}: {:?}", id, qa);
        Ok(id)
    }

    async fn update_qa_pair(&self, id: i64, qa: &NewQaPair) -> Result<bool, AppError> {
        let res = sqlx::query(QaPair::update())
            .bind(&qa.question)
            .bind(&qa.keywords)
            .bind(&qa.answer)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_qa_pair(&self, id: i64) -> Result<bool, AppError> {
        let res = sqlx::query(QaPair::delete())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[async_trait]
impl ChatLogStore for SqliteStore {
    async fn append_chat_log(&self, entry: &NewChatLog) -> Result<i64, AppError> {
        let id = sqlx::query(ChatLog::insert())
            .bind(&entry.user_message)
            .bind(&entry.bot_response)
            .bind(entry.understood)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        Ok(id)
    }

    async fn list_chat_logs(&self) -> Result<Vec<ChatLog>, AppError> {
        let res = sqlx::query_as::<_, ChatLog>(&format!(
            "{} ORDER BY timestamp DESC, id DESC",
            ChatLog::select_base()
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(res)
    }

    async fn count_chat_logs(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chat_logs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_by_understood(&self) -> Result<(i64, i64), AppError> {
        let rows = sqlx::query_as::<_, (bool, i64)>(ChatLog::count_by_understood())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .fold((0, 0), |(yes, no), (understood, count)| {
                if understood {
                    (yes + count, no)
                } else {
                    (yes, no + count)
                }
            }))
    }

    async fn top_messages(
        &self,
        understood: bool,
        limit: i64,
    ) -> Result<Vec<MessageFrequency>, AppError> {
        let res = sqlx::query_as::<_, MessageFrequency>(ChatLog::top_messages())
            .bind(understood)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(res)
    }
}

#[async_trait]
impl AdminUserStore for SqliteStore {
    async fn find_admin_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, AppError> {
        let res = sqlx::query_as::<_, AdminUser>(&format!(
            "{} WHERE username = ?1",
            AdminUser::select_query()
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(res)
    }

    async fn insert_admin(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<AdminUser, AppError> {
        let id = sqlx::query(AdminUser::insert_query())
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        let user = sqlx::query_as::<_, AdminUser>(&format!(
            "{} WHERE id = ?1",
            AdminUser::select_query()
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        debug!("INSERT admin user {}: {}", user.id, user.username);
        Ok(user)
    }

    async fn ensure_admin(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, AppError> {
        let res = sqlx::query(AdminUser::insert_or_ignore_query())
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    async fn store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:", 1).await.unwrap()
    }

    fn qa(question: &str, keywords: &str, answer: &str) -> NewQaPair {
        NewQaPair {
            question: question.to_owned(),
            keywords: keywords.to_owned(),
            answer: answer.to_owned(),
        }
    }

    fn log(message: &str, understood: bool) -> NewChatLog {
        NewChatLog {
            user_message: message.to_owned(),
            bot_response: "respuesta".to_owned(),
            understood,
        }
    }

    #[tokio::test]
    async fn migrations_seed_sample_records() {
        let store = store().await;
        let records = store.list_qa_pairs().await.unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(records[0].id, 1);
        assert!(records[3].keyword_list().contains(&"partner".to_owned()));
    }

    #[tokio::test]
    async fn qa_pair_lifecycle() {
        let store = store().await;
        let id = store
            .insert_qa_pair(&qa("¿Horario?", "horario,hora", "De 8 a 5"))
            .await
            .unwrap();
        assert!(
            store
                .update_qa_pair(id, &qa("¿Horario?", "horario", "De 9 a 6"))
                .await
                .unwrap()
        );
        let records = store.list_qa_pairs().await.unwrap();
        let updated = records.iter().find(|r| r.id == id).unwrap();
        assert_eq!(updated.answer, "De 9 a 6");
        assert_eq!(updated.keywords, "horario");

        assert!(store.delete_qa_pair(id).await.unwrap());
        assert!(!store.delete_qa_pair(id).await.unwrap());
        assert!(!store.update_qa_pair(id, &qa("a", "b", "c")).await.unwrap());
        assert!(store.list_qa_pairs().await.unwrap().iter().all(|r| r.id != id));
    }

    #[tokio::test]
    async fn chat_log_aggregates() {
        let store = store().await;
        for entry in [
            log("oracle", true),
            log("oracle", true),
            log("contacto", true),
            log("xyzxyz", false),
        ] {
            store.append_chat_log(&entry).await.unwrap();
        }
        assert_eq!(store.count_chat_logs().await.unwrap(), 4);
        assert_eq!(store.count_by_understood().await.unwrap(), (3, 1));

        let top = store.top_messages(true, 5).await.unwrap();
        assert_eq!(
            top[0],
            MessageFrequency {
                user_message: "oracle".to_owned(),
                frequency: 2
            }
        );
        assert_eq!(top.len(), 2);
        assert_eq!(store.top_messages(true, 1).await.unwrap().len(), 1);
        let missed = store.top_messages(false, 5).await.unwrap();
        assert_eq!(missed[0].user_message, "xyzxyz");

        let logs = store.list_chat_logs().await.unwrap();
        assert_eq!(logs.len(), 4);
        assert_eq!(logs[0].user_message, "xyzxyz");
        assert!(!logs[0].understood);
    }

    #[tokio::test]
    async fn empty_log_counts_are_zero() {
        let store = store().await;
        assert_eq!(store.count_chat_logs().await.unwrap(), 0);
        assert_eq!(store.count_by_understood().await.unwrap(), (0, 0));
        assert!(store.top_messages(false, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_users_are_unique() {
        let store = store().await;
        let user = store
            .insert_admin("admin", "admin@example.com", "hash")
            .await
            .unwrap();
        assert_eq!(user.username, "admin");

        let err = store
            .insert_admin("admin", "other@example.com", "hash")
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 409);
        let err = store
            .insert_admin("other", "admin@example.com", "hash")
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 409);

        assert!(!store.ensure_admin("admin", "admin@example.com", "x").await.unwrap());
        assert!(store.ensure_admin("root", "root@example.com", "x").await.unwrap());

        let found = store.find_admin_by_username("admin").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(store.find_admin_by_username("nobody").await.unwrap().is_none());
    }
}
