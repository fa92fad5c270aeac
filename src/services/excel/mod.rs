pub mod reader;
pub mod types;
pub mod utils;

pub use reader::read_workbook;
pub use types::{cell_at, Cell, Sheet, Workbook};
pub use utils::{export_url, load_file_from_url};
