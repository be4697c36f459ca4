//! Caller identity for audit stamping.

/// The identity on whose behalf a mutation is performed.
///
/// Supplied by the collaborator that authenticated the request; the
/// directory never derives an actor itself.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
