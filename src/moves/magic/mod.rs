mod precompute;
mod search;
mod structs;

pub use precompute::generate_magic_tables;
pub use structs::{MagicEntry, MagicTables};
