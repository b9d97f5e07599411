use serde::{Deserialize, Serialize};

use crate::enums::{QueryMode, Role, SortDirection};

/// Predicate on a text column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StringFilter {
    Equals { value: String, mode: QueryMode },
    In(Vec<String>),
    NotIn(Vec<String>),
    Contains { value: String, mode: QueryMode },
    StartsWith { value: String, mode: QueryMode },
    EndsWith { value: String, mode: QueryMode },
}

impl StringFilter {
    pub fn equals(value: impl Into<String>) -> Self {
        StringFilter::Equals {
            value: value.into(),
            mode: QueryMode::Default,
        }
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StringFilter::In(values.into_iter().map(Into::into).collect())
    }

    pub fn none_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StringFilter::NotIn(values.into_iter().map(Into::into).collect())
    }

    pub fn contains(value: impl Into<String>, mode: QueryMode) -> Self {
        StringFilter::Contains {
            value: value.into(),
            mode,
        }
    }

    pub fn starts_with(value: impl Into<String>, mode: QueryMode) -> Self {
        StringFilter::StartsWith {
            value: value.into(),
            mode,
        }
    }

    pub fn ends_with(value: impl Into<String>, mode: QueryMode) -> Self {
        StringFilter::EndsWith {
            value: value.into(),
            mode,
        }
    }
}

/// Predicate on an integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntFilter {
    Equals(i64),
    Gt(i64),
    Gte(i64),
    Lt(i64),
    Lte(i64),
}

/// Boolean predicate tree over user columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserFilter {
    Name(StringFilter),
    Email(StringFilter),
    Age(IntFilter),
    Role(Role),
    /// All must match. An empty list matches every row.
    And(Vec<UserFilter>),
    /// At least one must match. An empty list matches no row.
    Or(Vec<UserFilter>),
    Not(Box<UserFilter>),
}

impl UserFilter {
    pub fn negate(self) -> Self {
        UserFilter::Not(Box::new(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserField {
    Name,
    Email,
    Age,
    Role,
}

impl UserField {
    pub fn column(&self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Email => "email",
            UserField::Age => "age",
            UserField::Role => "role",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOrder {
    pub field: UserField,
    pub direction: SortDirection,
}

impl UserOrder {
    pub fn asc(field: UserField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: UserField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Options for multi-row user queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FindOptions {
    pub filter: Option<UserFilter>,
    /// Rows are in insertion order when empty.
    pub order_by: Vec<UserOrder>,
    /// Maximum number of rows (LIMIT).
    pub take: Option<u32>,
    /// Rows to skip before the first returned one (OFFSET).
    pub skip: Option<u32>,
}

impl FindOptions {
    pub fn filtered(filter: UserFilter) -> Self {
        Self {
            filter: Some(filter),
            ..Default::default()
        }
    }

    pub fn order_by(mut self, order: UserOrder) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn take(mut self, take: u32) -> Self {
        self.take = Some(take);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }
}
