pub mod cpi_reader;
pub mod encoding;
pub mod transaction_reader;

pub use cpi_reader::{CpiReader, CpiRow, CpiTable};
pub use encoding::read_source_text;
pub use transaction_reader::TransactionReader;
