use crate::db::models::{DbUser, Progress, ProgressUpdate};
use crate::db::schema::{ADD_PROGRESS_COLUMN, SQLITE_INIT};
use crate::error::TutorError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and make sure
    /// the schema is current.
    pub async fn connect(database_url: &str) -> Result<Self, TutorError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Initialize the schema by executing the bundled DDL, then add the
    /// `progress` column to tables that predate it.
    pub async fn init_schema(&self) -> Result<(), TutorError> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }

        let columns = sqlx::query("PRAGMA table_info(users)")
            .fetch_all(&self.pool)
            .await?;
        let has_progress = columns
            .iter()
            .filter_map(|row| row.try_get::<String, _>("name").ok())
            .any(|name| name == "progress");
        if !has_progress {
            info!("users table lacks progress column; migrating");
            sqlx::query(ADD_PROGRESS_COLUMN).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a new user with an empty progress document.
    /// Fails with `UsernameTaken` if the name is already registered.
    pub async fn create_user(&self, username: &str, password_hash: &str) -> Result<(), TutorError> {
        let progress = serde_json::to_string(&Progress::default())?;
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password, progress) VALUES (?, ?, ?)
            ON CONFLICT(username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(progress)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(TutorError::UsernameTaken(username.to_string()));
        }
        Ok(())
    }

    pub async fn find_user(&self, username: &str) -> Result<Option<DbUser>, TutorError> {
        let user = sqlx::query_as::<_, DbUser>(
            "SELECT username, password, progress FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Progress document for `username`; unknown users read as empty.
    pub async fn get_progress(&self, username: &str) -> Result<Progress, TutorError> {
        match self.find_user(username).await? {
            Some(user) => Ok(user.progress()?),
            None => Ok(Progress::default()),
        }
    }

    /// Read-modify-write of the progress document. Concurrent writers race and
    /// the last one wins.
    pub async fn update_progress(
        &self,
        username: &str,
        update: ProgressUpdate,
    ) -> Result<Progress, TutorError> {
        let mut progress = self.get_progress(username).await?;
        progress.apply(update);

        sqlx::query("UPDATE users SET progress = ? WHERE username = ?")
            .bind(serde_json::to_string(&progress)?)
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(progress)
    }
}
