pub mod common;
pub mod core_sdk;
pub mod prelude;
pub mod report_sdk;
pub mod session;
pub mod swap_sdk;
pub mod validator_sdk;
