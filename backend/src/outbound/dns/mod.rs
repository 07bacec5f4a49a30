//! DNS adapters.

mod txt_resolver;

pub use txt_resolver::HickoryTxtResolver;
