//! User repository for account and session database operations.

use domain::models::{ImportReport, UserImportRow};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{UserEntity, UserSessionEntity};
use crate::metrics::QueryTimer;

/// Repository for account- and session-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an account by username OR email; the login identifier matches
    /// either column.
    pub async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_identifier");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE username = $1 OR email = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check username uniqueness, optionally ignoring one account (self on
    /// update).
    pub async fn username_taken(
        &self,
        username: &str,
        ignore_id: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_username_taken");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE username = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(username)
        .bind(ignore_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check email uniqueness, optionally ignoring one account.
    pub async fn email_taken(
        &self,
        email: &str,
        ignore_id: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_email_taken");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(ignore_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new account.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all accounts, newest first.
    pub async fn list(&self) -> Result<Vec<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_users");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update an account. NULL arguments leave the column untouched.
    pub async fn update_user(
        &self,
        id: Uuid,
        username: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
        role: Option<&str>,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users
            SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                role = COALESCE($5, role),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an account. Sessions cascade.
    pub async fn delete_user(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_user");
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Create a new session for an issued bearer token.
    pub async fn create_session(
        &self,
        user_id: Uuid,
        token_hash: &str,
    ) -> Result<UserSessionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user_session");
        let result = sqlx::query_as::<_, UserSessionEntity>(
            r#"
            INSERT INTO user_sessions (user_id, token_hash)
            VALUES ($1, $2)
            RETURNING id, user_id, token_hash, created_at, last_used_at
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a session by token hash and touch its last-used timestamp.
    pub async fn find_session_by_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserSessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_session_by_token");
        let result = sqlx::query_as::<_, UserSessionEntity>(
            r#"
            UPDATE user_sessions
            SET last_used_at = NOW()
            WHERE token_hash = $1
            RETURNING id, user_id, token_hash, created_at, last_used_at
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Revoke the session identified by a token hash. Other sessions of the
    /// same account are left alone.
    pub async fn delete_session_by_token(&self, token_hash: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_session_by_token");
        let result = sqlx::query("DELETE FROM user_sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Import a batch of account rows inside one transaction.
    ///
    /// Rows are processed independently: blanks and in-batch duplicates are
    /// recorded in the report without aborting the batch; the transaction
    /// commits whatever succeeded. An error escaping this method rolls the
    /// whole batch back.
    pub async fn import_batch(
        &self,
        rows: &[UserImportRow],
        default_password_hash: &str,
    ) -> Result<ImportReport, sqlx::Error> {
        let timer = QueryTimer::new("import_users_batch");
        let mut report = ImportReport::default();
        let mut seen_usernames: Vec<String> = Vec::new();

        let mut tx = self.pool.begin().await?;

        for row in rows {
            let username = match &row.username {
                Some(u) => u.clone(),
                None => {
                    report.record_gagal(row.baris, "Username kosong");
                    continue;
                }
            };
            let email = match &row.email {
                Some(e) => e.clone(),
                None => {
                    report.record_gagal(row.baris, "Email kosong");
                    continue;
                }
            };
            if seen_usernames.contains(&username) {
                report.record_gagal(
                    row.baris,
                    format!("Username duplikat dalam berkas: {}", username),
                );
                continue;
            }

            // A failed statement would poison the whole transaction, so the
            // email collision is checked up front instead of caught.
            let email_conflict = sqlx::query_scalar::<_, bool>(
                r#"
                SELECT EXISTS(
                    SELECT 1 FROM users WHERE email = $1 AND username <> $2
                )
                "#,
            )
            .bind(&email)
            .bind(&username)
            .fetch_one(&mut *tx)
            .await?;

            if email_conflict {
                report.record_gagal(
                    row.baris,
                    format!("Email {} sudah dipakai akun lain", email),
                );
                continue;
            }

            let password_hash = row
                .password_hash
                .as_deref()
                .unwrap_or(default_password_hash);
            let role = row.role.as_deref().unwrap_or("user");

            sqlx::query(
                r#"
                INSERT INTO users (username, email, password_hash, role)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (username) DO UPDATE SET
                    email = EXCLUDED.email,
                    password_hash = EXCLUDED.password_hash,
                    role = EXCLUDED.role,
                    updated_at = NOW()
                "#,
            )
            .bind(&username)
            .bind(&email)
            .bind(password_hash)
            .bind(role)
            .execute(&mut *tx)
            .await?;

            seen_usernames.push(username);
            report.record_berhasil();
        }

        tx.commit().await?;
        timer.record();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    // Note: UserRepository tests require a database connection and are
    // covered by integration tests.
}
