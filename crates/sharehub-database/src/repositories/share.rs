//! Share record store implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use sharehub_core::error::{AppError, ErrorKind};
use sharehub_core::result::AppResult;
use sharehub_core::types::pagination::{PageRequest, PageResponse};
use sharehub_entity::share::{CreateShareRecord, ShareRecord};
use sharehub_entity::store::{ShareListFilter, ShareStatusFilter, ShareStore, ShareTotals};

/// PostgreSQL-backed [`ShareStore`].
#[derive(Debug, Clone)]
pub struct PgShareStore {
    pool: PgPool,
}

impl PgShareStore {
    /// Create a new share store on the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareStore for PgShareStore {
    async fn insert(&self, data: &CreateShareRecord) -> AppResult<ShareRecord> {
        sqlx::query_as::<_, ShareRecord>(
            "INSERT INTO share_records (id, download_id, cid, gateway_url, original_name, \
             mime_type, size_bytes, owner_id, password_hash, expires_at, max_downloads, \
             upload_ip, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.download_id)
        .bind(&data.cid)
        .bind(&data.gateway_url)
        .bind(&data.original_name)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .bind(data.owner_id)
        .bind(&data.password_hash)
        .bind(data.expires_at)
        .bind(data.max_downloads)
        .bind(&data.upload_ip)
        .bind(&data.user_agent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation())
            {
                AppError::conflict("Download ID is already in use")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create share record", e)
            }
        })
    }

    async fn find_by_download_id(&self, download_id: &str) -> AppResult<Option<ShareRecord>> {
        sqlx::query_as::<_, ShareRecord>("SELECT * FROM share_records WHERE download_id = $1")
            .bind(download_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share record", e)
            })
    }

    async fn download_id_exists(&self, download_id: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM share_records WHERE download_id = $1)",
        )
        .bind(download_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check download ID", e))
    }

    async fn update(&self, record: &ShareRecord) -> AppResult<ShareRecord> {
        sqlx::query_as::<_, ShareRecord>(
            "UPDATE share_records SET password_hash = $2, expires_at = $3, max_downloads = $4, \
             is_active = $5, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(record.id)
        .bind(&record.password_hash)
        .bind(record.expires_at)
        .bind(record.max_downloads)
        .bind(record.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update share record", e))
    }

    async fn record_download(&self, download_id: &str) -> AppResult<Option<ShareRecord>> {
        // The downloadability check and the increment must be one
        // conditional statement; a separate read-then-write would let two
        // concurrent downloads both pass the limit check.
        sqlx::query_as::<_, ShareRecord>(
            "UPDATE share_records \
             SET download_count = download_count + 1, updated_at = NOW() \
             WHERE download_id = $1 \
               AND is_active = TRUE \
               AND (expires_at IS NULL OR expires_at > NOW()) \
               AND (max_downloads IS NULL OR download_count < max_downloads) \
             RETURNING *",
        )
        .bind(download_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record download", e))
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareRecord>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM share_records WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count share records", e)
                })?;

        let records = sqlx::query_as::<_, ShareRecord>(
            "SELECT * FROM share_records WHERE owner_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list share records", e))?;

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn list_filtered(
        &self,
        filter: &ShareListFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareRecord>> {
        let mut count_query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM share_records WHERE TRUE");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count share records", e)
            })?;

        let mut list_query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM share_records WHERE TRUE");
        push_filters(&mut list_query, filter);
        list_query.push(" ORDER BY created_at DESC LIMIT ");
        list_query.push_bind(page.limit() as i64);
        list_query.push(" OFFSET ");
        list_query.push_bind(page.offset() as i64);

        let records = list_query
            .build_query_as::<ShareRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list share records", e)
            })?;

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn delete(&self, download_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM share_records WHERE download_id = $1")
            .bind(download_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete share record", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn totals(&self) -> AppResult<ShareTotals> {
        let row: (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(download_count), 0), \
             COALESCE(SUM(size_bytes), 0)::BIGINT FROM share_records",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to aggregate totals", e))?;

        Ok(ShareTotals {
            total_files: row.0 as u64,
            total_downloads: row.1 as u64,
            total_bytes: row.2 as u64,
        })
    }
}

/// Append the WHERE conditions for a [`ShareListFilter`].
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &ShareListFilter) {
    if let Some(ref name) = filter.name_contains {
        query.push(" AND original_name ILIKE ");
        query.push_bind(format!("%{name}%"));
    }
    match filter.status {
        Some(ShareStatusFilter::Expired) => {
            query.push(" AND expires_at IS NOT NULL AND expires_at < NOW()");
        }
        Some(ShareStatusFilter::Active) => {
            query.push(" AND (expires_at IS NULL OR expires_at > NOW())");
        }
        None => {}
    }
    if let Some(owner_id) = filter.owner_id {
        query.push(" AND owner_id = ");
        query.push_bind(owner_id);
    }
}
