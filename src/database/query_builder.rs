use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::filter::{Filter, MeasurementQuery};

/// Typed SELECT over a [`Filter`], binding its text parameters in order
pub struct QueryBuilder<T> {
    filter: Filter,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    pub fn new(table_name: &'static str, columns: &[&'static str]) -> Self {
        Self {
            filter: Filter::new(table_name, columns),
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn filter(mut self, query: MeasurementQuery) -> Self {
        self.filter.assign(query);
        self
    }

    pub async fn select_all(self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let sql_result = self.filter.to_sql();
        tracing::debug!(query = %sql_result.query, params = sql_result.params.len(), "select");

        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = q.bind(p.as_str());
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }
}
