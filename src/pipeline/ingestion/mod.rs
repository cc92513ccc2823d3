pub mod reader;

pub use reader::{read_ledger, EXPECTED_COLUMNS};
