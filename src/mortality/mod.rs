//! Mortality assumptions: survivorship tables, CSV loading, synthetic fallback

mod table;
pub mod loader;
pub mod synthetic;

pub use table::{MortalityRecord, MortalityTable};
pub use loader::{load_table, load_table_from_reader};
pub use synthetic::{default_synthetic_table, gompertz_table};
