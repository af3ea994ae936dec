//! Helper functions shared by the unit tests
pub mod test_helper;
