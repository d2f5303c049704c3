mod parse_good;
pub mod utils;
