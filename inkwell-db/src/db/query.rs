//! Compilation of filter, ordering and update values into SQL fragments.
//!
//! Every user-supplied value is bound as a parameter; only column names from
//! the closed [`UserField`] set and fixed operators are spliced into the text.

use inkwell_types::{
    FindOptions, IntChange, IntFilter, QueryMode, StringFilter, UserFilter, UserOrder,
    UserUpdate,
};
use rusqlite::types::Value;

/// A piece of SQL together with the parameters it binds, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<Value>,
}

impl SqlFragment {
    fn push_param(&mut self, value: impl Into<Value>) {
        self.params.push(value.into());
    }
}

/// Compile a filter into a boolean expression usable after `WHERE`.
pub fn where_clause(filter: &UserFilter) -> SqlFragment {
    let mut fragment = SqlFragment::default();
    push_filter(filter, &mut fragment);
    fragment
}

/// `WHERE ...` for an optional filter, or an empty fragment.
pub fn optional_where(filter: Option<&UserFilter>) -> SqlFragment {
    match filter {
        Some(filter) => {
            let mut fragment = where_clause(filter);
            fragment.sql = format!(" WHERE {}", fragment.sql);
            fragment
        }
        None => SqlFragment::default(),
    }
}

fn push_filter(filter: &UserFilter, out: &mut SqlFragment) {
    match filter {
        UserFilter::Name(f) => push_string_filter("name", f, out),
        UserFilter::Email(f) => push_string_filter("email", f, out),
        UserFilter::Age(f) => push_int_filter("age", *f, out),
        UserFilter::Role(role) => {
            out.sql.push_str("role = ?");
            out.push_param(role.as_str().to_string());
        }
        UserFilter::And(filters) => push_group(filters, " AND ", "1", out),
        UserFilter::Or(filters) => push_group(filters, " OR ", "0", out),
        UserFilter::Not(inner) => {
            out.sql.push_str("NOT (");
            push_filter(inner, out);
            out.sql.push(')');
        }
    }
}

fn push_group(filters: &[UserFilter], joiner: &str, identity: &str, out: &mut SqlFragment) {
    if filters.is_empty() {
        out.sql.push_str(identity);
        return;
    }
    out.sql.push('(');
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            out.sql.push_str(joiner);
        }
        push_filter(filter, out);
    }
    out.sql.push(')');
}

fn push_int_filter(column: &str, filter: IntFilter, out: &mut SqlFragment) {
    let (op, value) = match filter {
        IntFilter::Equals(v) => ("=", v),
        IntFilter::Gt(v) => (">", v),
        IntFilter::Gte(v) => (">=", v),
        IntFilter::Lt(v) => ("<", v),
        IntFilter::Lte(v) => ("<=", v),
    };
    out.sql.push_str(&format!("{} {} ?", column, op));
    out.push_param(value);
}

fn push_string_filter(column: &str, filter: &StringFilter, out: &mut SqlFragment) {
    match filter {
        StringFilter::In(values) | StringFilter::NotIn(values) => {
            let negated = matches!(filter, StringFilter::NotIn(_));
            if values.is_empty() {
                // IN () matches nothing, NOT IN () matches everything
                out.sql.push_str(if negated { "1" } else { "0" });
                return;
            }
            let placeholders = vec!["?"; values.len()].join(", ");
            let op = if negated { "NOT IN" } else { "IN" };
            out.sql.push_str(&format!("{} {} ({})", column, op, placeholders));
            for value in values {
                out.push_param(value.clone());
            }
        }
        StringFilter::Equals { value, mode } => {
            let (col, param) = operands(column, *mode);
            out.sql.push_str(&format!("{} = {}", col, param));
            out.push_param(value.clone());
        }
        StringFilter::Contains { value, mode } => {
            let (col, param) = operands(column, *mode);
            out.sql.push_str(&format!("instr({}, {}) > 0", col, param));
            out.push_param(value.clone());
        }
        StringFilter::StartsWith { value, mode } => {
            let (col, param) = operands(column, *mode);
            out.sql.push_str(&format!("instr({}, {}) = 1", col, param));
            out.push_param(value.clone());
        }
        StringFilter::EndsWith { value, mode } => {
            let (col, param) = operands(column, *mode);
            out.sql.push_str(&format!(
                "(length({col}) >= length({p}) AND substr({col}, length({col}) - length({p}) + 1) = {p})",
                col = col,
                p = param
            ));
            for _ in 0..3 {
                out.push_param(value.clone());
            }
        }
    }
}

// SQLite's LOWER only folds ASCII letters
fn operands(column: &str, mode: QueryMode) -> (String, &'static str) {
    match mode {
        QueryMode::Default => (column.to_string(), "?"),
        QueryMode::Insensitive => (format!("LOWER({})", column), "LOWER(?)"),
    }
}

/// `ORDER BY` clause; rowid breaks ties so pagination is deterministic.
pub fn order_clause(order_by: &[UserOrder]) -> String {
    let mut terms: Vec<String> = order_by
        .iter()
        .map(|o| format!("{} {}", o.field.column(), o.direction.as_sql()))
        .collect();
    terms.push("rowid ASC".to_string());
    format!(" ORDER BY {}", terms.join(", "))
}

/// `LIMIT ? OFFSET ?` for the options' take/skip, or an empty fragment.
pub fn pagination(options: &FindOptions) -> SqlFragment {
    let mut fragment = SqlFragment::default();
    if options.take.is_none() && options.skip.is_none() {
        return fragment;
    }
    fragment.sql.push_str(" LIMIT ? OFFSET ?");
    // A negative LIMIT means no limit in SQLite
    fragment.push_param(options.take.map(i64::from).unwrap_or(-1));
    fragment.push_param(i64::from(options.skip.unwrap_or(0)));
    fragment
}

/// Complete SELECT over users for the given options.
pub fn select_users(columns: &str, options: &FindOptions) -> SqlFragment {
    let mut fragment = optional_where(options.filter.as_ref());
    fragment.sql = format!("SELECT {} FROM users{}", columns, fragment.sql);
    fragment.sql.push_str(&order_clause(&options.order_by));

    let page = pagination(options);
    fragment.sql.push_str(&page.sql);
    fragment.params.extend(page.params);
    fragment
}

/// `SET` assignments for an update, or `None` when nothing changes.
pub fn set_clause(update: &UserUpdate) -> Option<SqlFragment> {
    if update.is_empty() {
        return None;
    }

    let mut assignments = Vec::new();
    let mut fragment = SqlFragment::default();

    if let Some(name) = &update.name {
        assignments.push("name = ?".to_string());
        fragment.push_param(name.clone());
    }
    if let Some(email) = &update.email {
        assignments.push("email = ?".to_string());
        fragment.push_param(email.clone());
    }
    if let Some(change) = update.age {
        let (expr, value) = int_change("age", change);
        assignments.push(format!("age = {}", expr));
        fragment.push_param(value);
    }
    if let Some(role) = update.role {
        assignments.push("role = ?".to_string());
        fragment.push_param(role.as_str().to_string());
    }

    fragment.sql = assignments.join(", ");
    Some(fragment)
}

// Division by zero yields NULL and overflow yields REAL; the age column rejects both
fn int_change(column: &str, change: IntChange) -> (String, i64) {
    match change {
        IntChange::Set(v) => ("?".to_string(), v),
        IntChange::Increment(v) => (format!("{} + ?", column), v),
        IntChange::Decrement(v) => (format!("{} - ?", column), v),
        IntChange::Multiply(v) => (format!("{} * ?", column), v),
        IntChange::Divide(v) => (format!("{} / ?", column), v),
    }
}
