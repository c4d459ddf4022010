pub mod import;
pub mod recruitment;
