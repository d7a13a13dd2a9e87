mod db_tests;
pub mod test_helpers;
mod transaction_tests;
