//! Translation of store-agnostic [`Filter`]s into BSON documents.
//!
//! This is the only place that knows the MongoDB query shapes, so the
//! rest of the workspace can build predicates without a `bson`
//! dependency.

use bson::{doc, Bson, Document};

use crate::query::{Constraint, Filter, Value};

impl From<&Value> for Bson {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(string) => Bson::String(string.clone()),
            Value::Integer(integer) => Bson::Int64(*integer),
        }
    }
}

impl From<&Constraint> for Bson {
    fn from(constraint: &Constraint) -> Self {
        match constraint {
            Constraint::Equals(value) => value.into(),
            Constraint::Range { gte, lte } => {
                let mut range = Document::new();
                if let Some(gte) = gte {
                    range.insert("$gte", Bson::Int64(*gte));
                }
                if let Some(lte) = lte {
                    range.insert("$lte", Bson::Int64(*lte));
                }
                Bson::Document(range)
            }
        }
    }
}

impl From<&Filter> for Document {
    fn from(filter: &Filter) -> Self {
        let mut document = Document::new();
        for (field, constraint) in &filter.fields {
            document.insert(field.as_str(), Bson::from(constraint));
        }
        if !filter.or.is_empty() {
            let branches: Vec<Bson> = filter
                .or
                .iter()
                .map(|branch| Bson::Document(branch.into()))
                .collect();
            document.insert("$or", branches);
        }
        if !filter.and.is_empty() {
            let branches: Vec<Bson> = filter
                .and
                .iter()
                .map(|branch| Bson::Document(branch.into()))
                .collect();
            document.insert("$and", branches);
        }
        document
    }
}
