use serde::Deserialize;

use super::error::FilterError;
use crate::config::FilterConfig;

/// Raw `GET /measurements/` query string, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub source: Option<String>,
    pub unit: Option<String>,
    pub order_by: Option<String>,
    pub order: Option<String>,
}

/// Columns a list may be ordered by. Nothing else ever reaches ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderColumn {
    Co2Value,
    CreatedAt,
}

impl OrderColumn {
    pub fn parse(name: &str) -> Result<Self, FilterError> {
        match name {
            "co2_value" => Ok(OrderColumn::Co2Value),
            "created_at" => Ok(OrderColumn::CreatedAt),
            other => Err(FilterError::InvalidOrderColumn(other.to_string())),
        }
    }

    pub fn column_name(&self) -> &'static str {
        match self {
            OrderColumn::Co2Value => "co2_value",
            OrderColumn::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Result<Self, FilterError> {
        match value {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(FilterError::InvalidSortDirection(other.to_string())),
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOrderInfo {
    pub column: OrderColumn,
    pub sort: SortDirection,
}

/// Columns that accept exact-match filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhereColumn {
    Source,
    Unit,
}

impl WhereColumn {
    pub fn column_name(&self) -> &'static str {
        match self {
            WhereColumn::Source => "source",
            WhereColumn::Unit => "unit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterWhereInfo {
    pub column: WhereColumn,
    pub value: String,
}

/// Validated list query, shared by every store implementation
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementQuery {
    pub skip: i64,
    pub limit: i64,
    pub source: Option<String>,
    pub unit: Option<String>,
    pub order: Option<FilterOrderInfo>,
}

impl Default for MeasurementQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            source: None,
            unit: None,
            order: None,
        }
    }
}

impl MeasurementQuery {
    /// Validate raw parameters against the order whitelist and paging rules.
    /// `order` without `order_by` is validated but has nothing to apply to.
    pub fn from_params(params: ListParams, config: &FilterConfig) -> Result<Self, FilterError> {
        let skip = params.skip.unwrap_or(0);
        if skip < 0 {
            return Err(FilterError::InvalidOffset(skip));
        }

        let requested = params.limit.unwrap_or(config.default_limit);
        if requested < 1 {
            return Err(FilterError::InvalidLimit(requested));
        }
        let limit = match config.max_limit {
            Some(max) if requested > max => {
                tracing::warn!("Limit {} exceeds max {}, capping to max", requested, max);
                max
            }
            _ => requested,
        };

        let sort = match params.order.as_deref() {
            Some(value) => SortDirection::parse(value)?,
            None => SortDirection::Asc,
        };
        let order = match params.order_by.as_deref() {
            Some(name) => Some(FilterOrderInfo { column: OrderColumn::parse(name)?, sort }),
            None => None,
        };

        Ok(Self {
            skip,
            limit,
            source: params.source,
            unit: params.unit,
            order,
        })
    }

    /// Equality predicates in a fixed column order
    pub fn where_infos(&self) -> Vec<FilterWhereInfo> {
        let mut infos = Vec::new();
        if let Some(source) = &self.source {
            infos.push(FilterWhereInfo { column: WhereColumn::Source, value: source.clone() });
        }
        if let Some(unit) = &self.unit {
            infos.push(FilterWhereInfo { column: WhereColumn::Unit, value: unit.clone() });
        }
        infos
    }
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<String>,
}
