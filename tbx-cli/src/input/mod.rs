//! Input handling module

pub mod file_reader;
pub mod glob_resolver;
pub mod pairing;
pub mod table_reader;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;
pub use pairing::{discover_pairs, iso_code, FilePair};
pub use table_reader::load_table;
