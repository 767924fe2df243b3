//! Integration tests for check-alpha-spec

mod helpers;
mod test_check;
mod test_fix;
