//! Error type shared by the facility-location API and configuration
//! validation.

use thiserror::Error;

/// Errors reported by checked operations of this crate.
///
/// Precondition failures of the facility-location API are returned as
/// explicit errors so the caller has to look at them. Reaching one from a
/// neighborhood getter means the getter produced a move that does not fit
/// the current solution state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalSearchError {
    /// `add_facility` was called on a facility that is already open.
    #[error("facility {0} is already chosen")]
    FacilityAlreadyChosen(String),

    /// `remove_facility` was called on a facility that is not open.
    #[error("facility {0} is not chosen")]
    FacilityNotChosen(String),

    /// The facility is neither chosen nor unchosen.
    #[error("facility {0} is not part of the facility universe")]
    UnknownFacility(String),

    /// The chosen and unchosen facility sets share a vertex.
    #[error("facility {0} is both chosen and unchosen")]
    OverlappingFacilities(String),

    /// A k-median search was started without any median.
    #[error("k-median search needs at least one initial median")]
    NoMedians,

    /// A configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LocalSearchError>;
