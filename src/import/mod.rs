mod csv_import;

pub use csv_import::{parse_amount, parse_date, CsvImporter};
