use std::collections::HashMap;

use crate::xml::Node;

/// Direction shared by every key of an `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Sort keys in the order they were listed, plus the clause direction.
#[derive(Debug, Clone, Default)]
pub(crate) struct SortSpec {
    /// Field name -> 1-based rank
    pub ranks: HashMap<String, usize>,
    /// Rank handed to the most recent key
    pub index: usize,
    /// `None` until an `ASC`/`DESC` is seen
    pub order: Option<SortOrder>,
}

impl SortSpec {
    pub fn push_key(&mut self, field: &str) {
        self.index += 1;
        self.ranks.insert(field.to_string(), self.index);
    }

    pub fn rank_of(&self, field: &str) -> Option<usize> {
        self.ranks.get(field).copied()
    }

    pub fn order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }
}

/// `LIMIT` bounds as written: `LIMIT first` or `LIMIT first, top`.
#[derive(Debug, Clone, Default)]
pub(crate) struct Limits {
    pub first: Option<String>,
    pub top: Option<String>,
}

impl Limits {
    /// Resolves the bounds to `(top, first)` attribute values.
    ///
    /// A lone number is a row count, so it moves to `top`.
    pub fn resolve(&self) -> (Option<&str>, Option<&str>) {
        match (self.first.as_deref(), self.top.as_deref()) {
            (first, Some(top)) => (Some(top), first),
            (Some(first), None) => (Some(first), None),
            (None, None) => (None, None),
        }
    }
}

/// State accumulated while walking the token stream.
#[derive(Debug, Clone, Default)]
pub(crate) struct QuerySpec {
    pub table: Option<String>,
    pub fields: Vec<String>,
    pub conditions: Vec<Node>,
    /// Created by the first `ORDER BY` key
    pub sort: Option<SortSpec>,
    pub limits: Limits,
    pub distinct: bool,
    pub count: bool,
}
