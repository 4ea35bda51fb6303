pub mod manager;
pub mod planets;

pub use manager::{DatabaseError, DatabaseManager};
pub use planets::PlanetRepository;
