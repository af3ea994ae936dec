//! various helper functions used to simplify unit tests.
//!
//! **Note**: This module is only compiled and used during testing. Hence, there might be no
//! further documentation show up.

#[cfg(test)]
pub mod test_helper {
    use log::Level;

    /// Checks that exactly the given warnings were logged.
    pub fn check_warnings(expected_warnings: Vec<&str>) {
        check_logs(Level::Warn, expected_warnings);
    }
    /// Checks that exactly the given messages were logged with the given level.
    pub fn check_logs(level: Level, expected_logs: Vec<&str>) {
        testing_logger::validate(|captured_logs| {
            let captured_logs: Vec<_> = captured_logs
                .iter()
                .filter(|l| l.level == level)
                .collect();
            assert_eq!(captured_logs.len(), expected_logs.len());
            for log in captured_logs.iter().zip(expected_logs.clone()) {
                assert_eq!(log.0.body, log.1);
            }
        });
    }
}
