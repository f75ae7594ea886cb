pub mod distance;
pub mod test_utils;
