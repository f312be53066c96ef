pub mod error;
pub mod headers;
pub mod hex;
pub mod requests;
pub mod views;

pub use error::*;
pub use hex::*;
pub use requests::*;
pub use views::*;
