use crate::TimestampFilter;

/// A store-agnostic query predicate over notification fields.
///
/// Handlers build a [`Filter`] and hand it to the store, which
/// translates it into its native document shape at the boundary (see
/// the `mongo` module). Field matches, `$or` branches and `$and`
/// branches all live at the same level and combine conjunctively.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    pub(crate) fields: Vec<(String, Constraint)>,
    pub(crate) or: Vec<Filter>,
    pub(crate) and: Vec<Filter>,
}

/// A condition on a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Equals(Value),
    Range { gte: Option<i64>, lte: Option<i64> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<F: Into<String>>(mut self, field: F, constraint: Constraint) -> Self {
        self.fields.push((field.into(), constraint));
        self
    }

    pub fn equals<F: Into<String>, V: Into<Value>>(self, field: F, value: V) -> Self {
        self.field(field, Constraint::Equals(value.into()))
    }

    pub fn at_least<F: Into<String>>(self, field: F, value: i64) -> Self {
        self.field(
            field,
            Constraint::Range {
                gte: Some(value),
                lte: None,
            },
        )
    }

    pub fn at_most<F: Into<String>>(self, field: F, value: i64) -> Self {
        self.field(
            field,
            Constraint::Range {
                gte: None,
                lte: Some(value),
            },
        )
    }

    /// Adds a branch to the filter's `$or` list.
    pub fn or(mut self, branch: Filter) -> Self {
        self.or.push(branch);
        self
    }

    /// Adds a branch to the filter's `$and` list.
    pub fn and(mut self, branch: Filter) -> Self {
        self.and.push(branch);
        self
    }

    /// Combines two filters conjunctively by joining their field
    /// matches, `$or` lists and `$and` lists.
    pub fn merge(mut self, other: Filter) -> Self {
        self.fields.extend(other.fields);
        self.or.extend(other.or);
        self.and.extend(other.and);
        self
    }
}

impl From<&TimestampFilter> for Filter {
    fn from(filter: &TimestampFilter) -> Self {
        match *filter {
            TimestampFilter::Exact(at) => Filter::new().equals("timestamp", at),
            TimestampFilter::AtLeast(from) => Filter::new().at_least("timestamp", from),
            TimestampFilter::AtMost(to) => Filter::new().at_most("timestamp", to),
            // both bounds are inclusive, rendered as two single-bound
            // conditions joined with `$and`
            TimestampFilter::Between(from, to) => Filter::new()
                .and(Filter::new().at_least("timestamp", from))
                .and(Filter::new().at_most("timestamp", to)),
        }
    }
}
