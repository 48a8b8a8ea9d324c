use crate::{
    PRIMARY_INDEX,
    model::{Column, ColumnCatalog},
};
use derive_more::{Deref, IntoIterator};
use std::{collections::BTreeMap, sync::Arc};

///
/// IndexColumns
/// Ordered columns composing one index.
///

pub type IndexColumns = Vec<Arc<Column>>;

///
/// IndexCatalog
///
/// Index name to ordered columns, iterated in name order.
/// Name order is what makes "first matching index" reproducible.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct IndexCatalog(BTreeMap<String, IndexColumns>);

impl IndexCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an index with already-resolved columns.
    #[must_use]
    pub fn with_index(mut self, name: impl Into<String>, columns: IndexColumns) -> Self {
        self.0.insert(name.into(), columns);
        self
    }

    /// Resolve index definitions given as column names against a catalog.
    ///
    /// Names the catalog does not know are dropped from that index; the
    /// index itself is kept, possibly shorter than declared.
    pub fn resolve<I, N, C, S>(columns: &ColumnCatalog, definitions: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::new();

        for (name, column_names) in definitions {
            let name = name.into();
            let mut resolved = Vec::new();

            for column_name in column_names {
                let column_name = column_name.as_ref();
                match columns.find(column_name) {
                    Some(column) => resolved.push(Arc::clone(column)),
                    None => tracing::trace!(
                        index = %name,
                        column = column_name,
                        "index column not in catalog; dropped"
                    ),
                }
            }

            catalog.0.insert(name, resolved);
        }

        catalog
    }

    /// The declared primary index, if any (possibly empty).
    #[must_use]
    pub fn primary(&self) -> Option<&IndexColumns> {
        self.0.get(PRIMARY_INDEX)
    }
}
