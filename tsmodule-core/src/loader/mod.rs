//! Resolution and load interception
//!
//! [`SpecifierResolver`] maps an import specifier to a `file:` URL using
//! [`candidates`] and an [`ExistenceProbe`]; [`LoadTransformer`] turns an
//! owned URL into transformed code. Both report `Delegate` for anything
//! they do not handle.

mod candidates;
mod load;
mod probe;
mod resolver;
mod specifier;

pub use candidates::{append_to_path, candidates, extension, strip_extension, CandidateMode};
pub use load::{
    options_for, FormatOutcome, LoadError, LoadOutcome, LoadResult, LoadTransformer,
    SourceOutcome,
};
pub use probe::ExistenceProbe;
pub use resolver::{DelegateReason, Resolution, ResolutionContext, SpecifierResolver};
pub use specifier::SpecifierKind;
