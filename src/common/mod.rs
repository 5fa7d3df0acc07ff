pub mod dates;
pub mod errors;
pub mod html;
