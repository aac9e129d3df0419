use serde_json::{json, Value};

/// Builder for the Record Store's JSON filter predicate tree.
///
/// Clauses are AND-combined, matching how every screen of the application
/// composes its search conditions. A field given as a dotted path
/// (`partner.id`) produces the nested relation form the store expects.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a filter that excludes soft-deleted records.
    pub fn not_deleted() -> Self {
        Self::new().neq("del_yn", "Y")
    }

    fn push(mut self, field: &str, op: &str, value: Value) -> Self {
        let mut node = json!({ op: value });
        for part in field.rsplit('.') {
            node = json!({ part: node });
        }
        self.clauses.push(node);
        self
    }

    pub fn eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.push(field, "_eq", value.into())
    }

    pub fn neq(self, field: &str, value: impl Into<Value>) -> Self {
        self.push(field, "_neq", value.into())
    }

    pub fn gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.push(field, "_gte", value.into())
    }

    pub fn lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.push(field, "_lte", value.into())
    }

    pub fn lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.push(field, "_lt", value.into())
    }

    pub fn icontains(self, field: &str, value: &str) -> Self {
        self.push(field, "_icontains", Value::String(value.trim().to_string()))
    }

    pub fn is_in(self, field: &str, values: Vec<Value>) -> Self {
        self.push(field, "_in", Value::Array(values))
    }

    pub fn not_in(self, field: &str, values: Vec<Value>) -> Self {
        self.push(field, "_nin", Value::Array(values))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Final predicate tree: `{"_and": [...]}`.
    pub fn build(self) -> Value {
        json!({ "_and": self.clauses })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_composition() {
        let filter = Filter::not_deleted()
            .gte("order_date", "2025-07-01")
            .lte("order_date", "2025-07-31")
            .build();
        assert_eq!(
            filter,
            json!({ "_and": [
                { "del_yn": { "_neq": "Y" } },
                { "order_date": { "_gte": "2025-07-01" } },
                { "order_date": { "_lte": "2025-07-31" } },
            ]})
        );
    }

    #[test]
    fn test_nested_relation_path() {
        let filter = Filter::new()
            .eq("partner.id", "d6e6568c-48f0-4951-89e5-1c88421de160")
            .build();
        assert_eq!(
            filter,
            json!({ "_and": [
                { "partner": { "id": { "_eq": "d6e6568c-48f0-4951-89e5-1c88421de160" } } },
            ]})
        );
    }

    #[test]
    fn test_not_in() {
        let filter = Filter::new()
            .not_in("status", vec![Value::String("입금완료".into())])
            .build();
        assert_eq!(
            filter,
            json!({ "_and": [ { "status": { "_nin": ["입금완료"] } } ] })
        );
    }
}
