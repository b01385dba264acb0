//! Row transforms
//!
//! A transform sees each candidate row before it is written and either
//! returns the projection to write or `None` to drop the row.

use crate::types::{JsonValue, PersistProperties};

/// Pluggable row filter/mapper
pub trait RowTransform<S: ?Sized = JsonValue> {
    /// Map a row's projection, or return `None` to reject the row
    fn transform(&self, source: &S, persist: PersistProperties) -> Option<PersistProperties>;

    /// Run `next` on rows this transform accepts
    fn and_then<T>(self, next: T) -> Chain<Self, T>
    where
        Self: Sized,
        T: RowTransform<S>,
    {
        Chain::new(self, next)
    }
}

impl<S, F> RowTransform<S> for F
where
    S: ?Sized,
    F: Fn(&S, PersistProperties) -> Option<PersistProperties>,
{
    fn transform(&self, source: &S, persist: PersistProperties) -> Option<PersistProperties> {
        self(source, persist)
    }
}

/// Two transforms applied in order
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    /// Compose two transforms
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<S, A, B> RowTransform<S> for Chain<A, B>
where
    S: ?Sized,
    A: RowTransform<S>,
    B: RowTransform<S>,
{
    fn transform(&self, source: &S, persist: PersistProperties) -> Option<PersistProperties> {
        let persist = self.first.transform(source, persist)?;
        self.second.transform(source, persist)
    }
}

/// Rejects rows where any of the listed fields is missing or null
#[derive(Debug, Clone, Default)]
pub struct RequireFields {
    fields: Vec<String>,
}

impl RequireFields {
    /// Create a filter for the given field names
    pub fn new<I, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the required field names
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl<S: ?Sized> RowTransform<S> for RequireFields {
    fn transform(&self, _source: &S, persist: PersistProperties) -> Option<PersistProperties> {
        let complete = self
            .fields
            .iter()
            .all(|f| persist.get(f).is_some_and(|v| !v.is_null()));
        complete.then_some(persist)
    }
}
