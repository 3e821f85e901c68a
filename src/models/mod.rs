// Module exports for models

pub mod date;
pub mod duration;
pub mod range;
pub mod value;
