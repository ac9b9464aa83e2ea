use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Measurement, MeasurementChanges, NewMeasurement};
use crate::database::query_builder::QueryBuilder;
use crate::database::store::MeasurementStore;
use crate::filter::MeasurementQuery;

const TABLE_NAME: &str = "measurements";

const COLUMNS: &[&'static str] = &["id", "co2_value", "unit", "source", "description", "created_at"];

const INSERT_SQL: &str = "INSERT INTO measurements (co2_value, unit, source, description) \
     VALUES ($1, $2, $3, $4) \
     RETURNING id, co2_value, unit, source, description, created_at";

const SELECT_BY_ID_SQL: &str = "SELECT id, co2_value, unit, source, description, created_at \
     FROM measurements WHERE id = $1";

const LOCK_BY_ID_SQL: &str = "SELECT id, co2_value, unit, source, description, created_at \
     FROM measurements WHERE id = $1 FOR UPDATE";

const UPDATE_SQL: &str = "UPDATE measurements \
     SET co2_value = $2, unit = $3, source = $4, description = $5 \
     WHERE id = $1 \
     RETURNING id, co2_value, unit, source, description, created_at";

const DELETE_SQL: &str = "DELETE FROM measurements WHERE id = $1";

/// PostgreSQL-backed measurement store
#[derive(Clone)]
pub struct MeasurementRepository {
    pool: PgPool,
}

impl MeasurementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn from_manager(manager: &DatabaseManager) -> Self {
        Self::new(manager.pool().clone())
    }
}

#[async_trait]
impl MeasurementStore for MeasurementRepository {
    async fn insert(&self, new: NewMeasurement) -> Result<Measurement, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Measurement>(INSERT_SQL)
            .bind(new.co2_value)
            .bind(&new.unit)
            .bind(&new.source)
            .bind(&new.description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!("Inserted measurement {}", row.id);
        Ok(row)
    }

    async fn find(&self, id: i64) -> Result<Option<Measurement>, DatabaseError> {
        let row = sqlx::query_as::<_, Measurement>(SELECT_BY_ID_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self, query: &MeasurementQuery) -> Result<Vec<Measurement>, DatabaseError> {
        QueryBuilder::<Measurement>::new(TABLE_NAME, COLUMNS)
            .filter(query.clone())
            .select_all(&self.pool)
            .await
    }

    async fn update(&self, id: i64, changes: MeasurementChanges) -> Result<Option<Measurement>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Row lock keeps concurrent writers serialized until commit
        let existing = sqlx::query_as::<_, Measurement>(LOCK_BY_ID_SQL)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut row) = existing else {
            return Ok(None);
        };

        changes.apply_to(&mut row);

        let updated = sqlx::query_as::<_, Measurement>(UPDATE_SQL)
            .bind(row.id)
            .bind(row.co2_value)
            .bind(&row.unit)
            .bind(&row.source)
            .bind(&row.description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!("Updated measurement {}", id);
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(DELETE_SQL).bind(id).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await?;
        tracing::debug!("Deleted measurement {}", id);
        Ok(true)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
