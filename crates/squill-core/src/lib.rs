pub mod dialect;
pub use dialect::Dialect;

pub mod driver;
pub use driver::Connection;

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::Table;

pub mod stmt;
pub use stmt::Statement;

/// A Result type alias that uses squill's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
