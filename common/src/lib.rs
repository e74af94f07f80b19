pub mod config;
pub mod test_tools;
