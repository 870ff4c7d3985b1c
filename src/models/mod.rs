pub mod split_delivery;
pub mod utils;
