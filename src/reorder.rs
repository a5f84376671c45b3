//! Re-projection of one dataset into another dataset's column layout.
//!
//! [`reorder()`] takes a reference dataset `a` and a source dataset `b` and
//! returns every record of `b`, in order, rewritten so that its keys are exactly
//! the columns of `a`'s first record. Columns of `a` without a counterpart in
//! `b` become null; columns of `b` without a counterpart in `a` are dropped.

use thiserror::Error;

use crate::{
    data::{Record, get_columns},
    mapping::{ColumnMapping, build_mapping},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("both datasets must have at least one record")]
    InvalidInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reordered {
    pub reordered: Vec<Record>,
    pub mapping: ColumnMapping,
}

pub fn reorder(a: &[Record], b: &[Record]) -> Result<Reordered, ReconcileError> {
    if a.is_empty() || b.is_empty() {
        return Err(ReconcileError::InvalidInput);
    }

    let columns_a = get_columns(a);
    let columns_b = get_columns(b);
    let mapping = build_mapping(&columns_a, &columns_b);

    let reordered = {
        let sources = columns_a
            .iter()
            .map(|column| mapping.get(column))
            .collect::<Vec<_>>();
        b.iter()
            .map(|row| {
                let mut aligned = Record::with_capacity(columns_a.len());
                for (target, source) in columns_a.iter().zip(&sources) {
                    let value = source.and_then(|name| row.get(name).cloned().flatten());
                    aligned.insert(target.as_str(), value);
                }
                aligned
            })
            .collect()
    };

    Ok(Reordered { reordered, mapping })
}
