pub mod error;
pub mod models;
pub mod weather_repository;

pub use error::DbError;
pub use models::*;
pub use weather_repository::WeatherRepository;
