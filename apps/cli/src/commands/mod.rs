pub mod barcode;
pub mod file;
pub mod records;
