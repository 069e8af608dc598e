pub(crate) mod bits;
pub mod error;
