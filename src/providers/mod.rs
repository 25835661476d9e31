pub mod frankfurter;
pub mod open_er;
pub mod relay;
pub mod util;
