use std::fmt;

use evo_types::UnsupportedShape;

/// Why no bound-satisfying concrete type could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionFailure {
    /// The candidate substitution violates a declared bound.
    BoundViolation,
    /// No type satisfies every bound simultaneously.
    NoCandidate,
    UnknownClass,
    UnknownTypeVariable,
    /// The requested supertype is not a supertype of the source.
    NotASupertype,
}

impl fmt::Display for ConstructionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstructionFailure::BoundViolation => "bound violation",
            ConstructionFailure::NoCandidate => "no candidate satisfies all bounds",
            ConstructionFailure::UnknownClass => "class not found in registry",
            ConstructionFailure::UnknownTypeVariable => "type variable not found in registry",
            ConstructionFailure::NotASupertype => "not a supertype",
        })
    }
}

/// Instantiation could not produce a concrete descriptor.
///
/// Never coerced into a default type: a caller that swallows this would end up synthesizing
/// ill-typed call sequences.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot instantiate {ty}: {reason}")]
pub struct ConstructionFailed {
    /// Java-like rendering of the descriptor being instantiated.
    pub ty: String,
    pub reason: ConstructionFailure,
}

impl ConstructionFailed {
    pub fn new(ty: impl Into<String>, reason: ConstructionFailure) -> Self {
        Self {
            ty: ty.into(),
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenericError {
    #[error(transparent)]
    Construction(#[from] ConstructionFailed),
    #[error(transparent)]
    Unsupported(#[from] UnsupportedShape),
}
