//! Aggregate root trait for the invoicing domain models.

/// Aggregate root marker + minimal interface.
///
/// Aggregates own their value objects outright and record what happened to
/// them as domain events (see `invoicing-events::PublishableEvents`). They
/// never perform IO.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;
}
