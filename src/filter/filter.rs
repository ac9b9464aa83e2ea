use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{MeasurementQuery, SqlResult};

/// Builds parameterized SELECT statements for a validated [`MeasurementQuery`]
pub struct Filter {
    table_name: &'static str,
    select_columns: Vec<&'static str>,
    query: MeasurementQuery,
}

impl Filter {
    pub fn new(table_name: &'static str, select_columns: &[&'static str]) -> Self {
        Self {
            table_name,
            select_columns: select_columns.to_vec(),
            query: MeasurementQuery::default(),
        }
    }

    pub fn assign(&mut self, query: MeasurementQuery) -> &mut Self {
        self.query = query;
        self
    }

    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.query.where_infos(), 0);
        let order_clause = FilterOrder::generate(self.query.order.as_ref());
        let limit_clause = format!("LIMIT {} OFFSET {}", self.query.limit, self.query.skip);

        let query = [
            format!("SELECT {}", self.build_select_clause()),
            format!("FROM \"{}\"", self.table_name),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            order_clause,
            limit_clause,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params }
    }

    fn build_select_clause(&self) -> String {
        if self.select_columns.is_empty() {
            "*".to_string()
        } else {
            self.select_columns.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", ")
        }
    }
}
