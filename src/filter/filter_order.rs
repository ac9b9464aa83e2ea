use super::types::FilterOrderInfo;

pub struct FilterOrder;

impl FilterOrder {
    /// ORDER BY clause. `id` always breaks ties so paging stays stable;
    /// without an explicit order rows come back in insertion order.
    pub fn generate(order: Option<&FilterOrderInfo>) -> String {
        match order {
            Some(info) => format!(
                "ORDER BY \"{}\" {}, \"id\" ASC",
                info.column.column_name(),
                info.sort.to_sql()
            ),
            None => "ORDER BY \"id\" ASC".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::types::{OrderColumn, SortDirection};

    #[test]
    fn default_order_is_by_id() {
        assert_eq!(FilterOrder::generate(None), "ORDER BY \"id\" ASC");
    }

    #[test]
    fn whitelisted_column_and_direction() {
        let info = FilterOrderInfo { column: OrderColumn::Co2Value, sort: SortDirection::Desc };
        assert_eq!(
            FilterOrder::generate(Some(&info)),
            "ORDER BY \"co2_value\" DESC, \"id\" ASC"
        );
    }
}
