//! Table metadata referenced by statements.

mod builder;
pub use builder::TableBuilder;

mod column;
pub use column::Column;

mod foreign_key;
pub use foreign_key::ForeignKey;

mod table;
pub use table::Table;
