pub mod catalog;
pub mod dto;
pub mod image;
pub mod import;
pub mod movie;
pub mod person;
pub mod validation;

pub use catalog::*;
pub use dto::*;
pub use image::ImageUrlBuilder;
pub use import::*;
pub use movie::*;
pub use person::*;
pub use validation::{ImportRange, Pagination, ValidationError};
