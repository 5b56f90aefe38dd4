pub mod s3;
pub mod scan_files;
pub mod ssm;
