//! `PostgreSQL` developer directory.

use super::{TaskPgPool, models::DeveloperRow, schema::developers};
use crate::task::{
    domain::{Developer, DeveloperId},
    ports::{DeveloperDirectory, DeveloperDirectoryError, DeveloperDirectoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed developer directory.
#[derive(Debug, Clone)]
pub struct PostgresDeveloperDirectory {
    pool: TaskPgPool,
}

impl PostgresDeveloperDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeveloperDirectory for PostgresDeveloperDirectory {
    async fn list_developers(&self) -> DeveloperDirectoryResult<Vec<Developer>> {
        let pool = self.pool.clone();
        let rows = tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DeveloperDirectoryError::persistence)?;
            developers::table
                .order(developers::name.asc())
                .select(DeveloperRow::as_select())
                .load::<DeveloperRow>(&mut connection)
                .map_err(DeveloperDirectoryError::persistence)
        })
        .await
        .map_err(DeveloperDirectoryError::persistence)??;

        Ok(rows
            .into_iter()
            .map(|row| Developer::with_id(DeveloperId::from_uuid(row.id), row.name))
            .collect())
    }
}
