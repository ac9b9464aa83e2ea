use super::types::FilterWhereInfo;

pub struct FilterWhere {
    param_values: Vec<String>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// AND-combined equality predicates with numbered placeholders.
    /// An empty condition list yields an empty clause.
    pub fn generate(conditions: &[FilterWhereInfo], starting_param_index: usize) -> (String, Vec<String>) {
        let mut filter_where = Self::new(starting_param_index);
        let clause = filter_where.build(conditions);
        (clause, filter_where.param_values)
    }

    fn build(&mut self, conditions: &[FilterWhereInfo]) -> String {
        let sql_conditions: Vec<String> = conditions
            .iter()
            .map(|condition| {
                let placeholder = self.param(condition.value.clone());
                format!("\"{}\" = {}", condition.column.column_name(), placeholder)
            })
            .collect();
        sql_conditions.join(" AND ")
    }

    fn param(&mut self, value: String) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}
