//! Keyset predicate expansion.
//!
//! Turns an ordered payload into the lexicographic "strictly after the
//! cursor row" comparison: a disjunction where the i-th branch pins the first
//! i keys with equality and compares the i-th key strictly in its sort
//! direction. The expansion is format-agnostic; a caller-supplied callback
//! produces the backend's comparison nodes.

use pagetoken_core::{KeysetPayload, Order};

/// Comparison operator requested from the backend expression factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Lt,
    Gt,
}

/// The expanded keyset predicate: a disjunction of conjunctions, plus the
/// ORDER BY pairs that accompany it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeysetPredicate<E> {
    /// OR-branches; branch `i` holds `i` equality conjuncts followed by one
    /// strict comparison.
    pub branches: Vec<Vec<E>>,
    /// `(path, order)` pairs in payload order.
    pub order_by: Vec<(String, Order)>,
}

/// Expand `payload` into a keyset predicate.
///
/// `field_fn(path, value, op)` converts one canonical string back to the
/// backend's native type and produces a comparison node; it is the single
/// seam between this library and any query builder. An ascending key
/// compares with `Gt`, a descending key with `Lt`, so the predicate selects
/// exactly the rows strictly after the cursor row under the payload's
/// ordering.
///
/// An empty payload expands to no predicate at all; choosing a default ORDER
/// BY for the first page is the caller's policy.
pub fn keyset_predicate<E, Err, F>(
    payload: &KeysetPayload,
    mut field_fn: F,
) -> Result<Option<KeysetPredicate<E>>, Err>
where
    F: FnMut(&str, &str, CompareOp) -> Result<E, Err>,
{
    let values = payload.values();
    if values.is_empty() {
        return Ok(None);
    }

    let mut branches = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let mut conjuncts = Vec::with_capacity(i + 1);

        for v in &values[..i] {
            conjuncts.push(field_fn(&v.path, &v.value, CompareOp::Eq)?);
        }

        let v = &values[i];
        let op = match v.order {
            Order::Asc => CompareOp::Gt,
            Order::Desc => CompareOp::Lt,
        };
        conjuncts.push(field_fn(&v.path, &v.value, op)?);

        branches.push(conjuncts);
    }

    let order_by = values
        .iter()
        .map(|v| (v.path.clone(), v.order))
        .collect();

    Ok(Some(KeysetPredicate { branches, order_by }))
}
