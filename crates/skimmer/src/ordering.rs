//! Ordering specs and the composite record comparator.

use std::cmp::Ordering;

use crate::record::Record;
use crate::value::Value;

/// Sort direction of one ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dir {
    /// Smallest value first.
    #[default]
    Asc,
    /// Largest value first.
    Desc,
}

impl Dir {
    /// Flips a comparison result when the direction is descending.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        })
    }
}

/// Projection applied to both sides of a comparison before ordering.
pub type Projection = Box<dyn Fn(&Value) -> Value>;

/// One tie-break key in a composite comparator.
pub struct OrderBy {
    field: String,
    dir: Dir,
    projection: Option<Projection>,
}

impl OrderBy {
    /// Creates an ordering on a field.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
            projection: None,
        }
    }

    /// Creates an ordering that projects values before comparing them,
    /// e.g. to sort numerically on a string field.
    pub fn with_projection(
        field: impl Into<String>,
        dir: Dir,
        projection: impl Fn(&Value) -> Value + 'static,
    ) -> Self {
        OrderBy {
            field: field.into(),
            dir,
            projection: Some(Box::new(projection)),
        }
    }

    /// The field this key orders on.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The sort direction.
    pub fn dir(&self) -> Dir {
        self.dir
    }
}

/// Compares two records using a list of ordering keys.
///
/// The first key is the primary sort, later keys break ties. Values
/// that cannot be compared (kind mismatch, NaN) count as ties. If every
/// key ties, the records are equal under the comparator; a stable sort
/// then keeps their pre-sort relative order.
pub fn compare_records(a: &Record, b: &Record, orderings: &[OrderBy]) -> Ordering {
    for order_by in orderings {
        let mut lhs = a.get(&order_by.field).cloned().unwrap_or(Value::Null);
        let mut rhs = b.get(&order_by.field).cloned().unwrap_or(Value::Null);

        if let Some(projection) = &order_by.projection {
            lhs = projection(&lhs);
            rhs = projection(&rhs);
        }

        if let Some(ordering) = lhs.compare(&rhs) {
            if ordering != Ordering::Equal {
                return order_by.dir.apply(ordering);
            }
        }
    }
    Ordering::Equal
}
