pub use macros::Ctor;

use crate::schemas::ChainInput;

/// Type-level constructor for chain inputs that borrow their data.
///
/// A chain is generic over the constructor rather than the input itself, so a
/// single chain can be called with inputs of any lifetime.
pub trait InputCtor: Send + Sync + 'static {
    type Target<'a>: ChainInput + 'a;
}
