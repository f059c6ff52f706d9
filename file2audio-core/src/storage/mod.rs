pub mod checksum;
pub mod file_set;
