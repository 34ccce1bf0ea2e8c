//! Error types for declaration construction and type resolution.
//!
//! Recoverable misuse of the declaration API (resolving a type twice,
//! building a malformed destructuring name) is reported through
//! [`DeclError`]. Reading a type that was never resolved is a contract
//! violation and panics instead; use the `*_if_resolved` probes to check
//! first.

use std::fmt;

use crate::decl::DeclKind;
use crate::loc::SourceLoc;

/// Errors that can occur while building or resolving declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclError {
    /// A type slot was set while it already held a type.
    ///
    /// # Examples
    ///
    /// ```text
    /// var x : Int = 1
    ///     ^
    /// error: type of var declaration is already resolved
    /// ```
    TypeAlreadyResolved {
        /// Kind of the declaration that owns the slot
        kind: DeclKind,
    },

    /// A type slot was overwritten before any type was set.
    TypeNotResolved {
        /// Kind of the declaration that owns the slot
        kind: DeclKind,
    },

    /// A parenthesized destructuring name had no elements.
    ///
    /// ```text
    /// var () = foo()
    ///     ^
    /// error: destructuring name has no elements
    /// ```
    EmptyVarNameList {
        /// Location of the opening parenthesis
        loc: SourceLoc,
    },

    /// A parenthesized destructuring name opened and closed at one location,
    /// which would make it indistinguishable from a simple name.
    DegenerateVarNameRange {
        /// The shared location
        loc: SourceLoc,
    },

    /// A simple destructuring name had the empty identifier.
    UnnamedVarNameLeaf {
        /// Location of the leaf
        loc: SourceLoc,
    },

    /// A destructuring name was placed in a list twice, or in two lists.
    SharedVarNameElement {
        /// Location of the shared element
        loc: SourceLoc,
    },
}

impl fmt::Display for DeclError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeAlreadyResolved { kind } => {
                write!(f, "type of {kind} declaration is already resolved")
            }
            Self::TypeNotResolved { kind } => {
                write!(f, "type of {kind} declaration is not resolved yet")
            }
            Self::EmptyVarNameList { loc } => {
                write!(f, "destructuring name at {loc} has no elements")
            }
            Self::DegenerateVarNameRange { loc } => {
                write!(f, "destructuring name opens and closes at {loc}")
            }
            Self::UnnamedVarNameLeaf { loc } => {
                write!(f, "destructuring name element at {loc} has no identifier")
            }
            Self::SharedVarNameElement { loc } => {
                write!(f, "destructuring name element at {loc} already has a parent")
            }
        }
    }
}

impl std::error::Error for DeclError {}

/// Result alias for declaration operations.
pub type DeclResult<T> = Result<T, DeclError>;
