//! Exit code standardization for spotprice
//!
//! ## Exit Code Convention
//!
//! - `0` = Success
//! - `1` = User error (invalid input, validation failure)
//! - `2` = System error (AWS API failure, network error, deadline exceeded)
//! - `3` = Configuration error (config parse error, bad config value)
//! - `4` = No data (query succeeded but matched no price entries)

use crate::error::SpotPriceError;

/// Standard exit codes for spotprice
pub mod codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// User error (invalid input, validation failure)
    pub const USER_ERROR: i32 = 1;
    /// System error (AWS API failure, network error)
    pub const SYSTEM_ERROR: i32 = 2;
    /// Configuration error
    pub const CONFIG_ERROR: i32 = 3;
    /// The window held no prices for the instance type
    pub const NO_DATA: i32 = 4;
}

/// Map a SpotPriceError to an appropriate exit code
pub fn exit_code_for_error(error: &SpotPriceError) -> i32 {
    use SpotPriceError::*;
    match error {
        Config(_) => codes::CONFIG_ERROR,
        Validation { .. } => codes::USER_ERROR,
        NoData { .. } => codes::NO_DATA,
        Fetch { .. } => codes::SYSTEM_ERROR,
        Json(_) => codes::SYSTEM_ERROR,
    }
}

/// Exit with appropriate code based on error type
pub fn exit_with_code(error: &SpotPriceError) -> ! {
    let code = exit_code_for_error(error);
    std::process::exit(code);
}
