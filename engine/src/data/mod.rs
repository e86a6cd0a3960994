// Loading of registration exports
pub mod csv_parser;
