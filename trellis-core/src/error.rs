//! Error types for the Trellis core library.
//!
//! Only misconfiguration and graph bookkeeping mistakes are reported. Races
//! between threads mutating a neighbour set are resolved internally and never
//! surface here.

use std::fmt;

use thiserror::Error;

use crate::encoding::NodeId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Errors produced by the Trellis core library.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TrellisError {
    /// A structure was constructed with a capacity of zero.
    #[error("{what} must be greater than zero (got {value})")]
    InvalidCapacity {
        /// Name of the rejected capacity parameter.
        what: &'static str,
        /// The value supplied by the caller.
        value: usize,
    },
    /// Graph parameters were inconsistent with each other.
    #[error("invalid graph parameter: {reason}")]
    InvalidParameters {
        /// Human-readable explanation of the rejected combination.
        reason: String,
    },
    /// A node was referenced before being added to the graph.
    #[error("node {node} has not been added to the graph")]
    UnknownNode {
        /// Identifier of the missing node.
        node: NodeId,
    },
    /// The same node was added to the graph more than once.
    #[error("node {node} has already been added to the graph")]
    DuplicateNode {
        /// Identifier of the node that already exists.
        node: NodeId,
    },
}

define_error_codes! {
    /// Stable codes describing [`TrellisError`] variants.
    enum TrellisErrorCode for TrellisError {
        /// A structure was constructed with a capacity of zero.
        InvalidCapacity => InvalidCapacity { .. } => "TRELLIS_INVALID_CAPACITY",
        /// Graph parameters were inconsistent with each other.
        InvalidParameters => InvalidParameters { .. } => "TRELLIS_INVALID_PARAMETERS",
        /// A node was referenced before being added to the graph.
        UnknownNode => UnknownNode { .. } => "TRELLIS_UNKNOWN_NODE",
        /// The same node was added to the graph more than once.
        DuplicateNode => DuplicateNode { .. } => "TRELLIS_DUPLICATE_NODE",
    }
}

impl TrellisError {
    pub(crate) const fn zero_capacity(what: &'static str) -> Self {
        Self::InvalidCapacity { what, value: 0 }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T, E = TrellisError> = core::result::Result<T, E>;
