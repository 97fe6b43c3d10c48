//! SurrealDB implementations of the `carevault-core` repository traits.

mod account;

pub use account::SurrealAccountRepository;
