pub mod favorites_service;
pub mod in_flight;
pub mod reaction_service;

pub use favorites_service::FavoritesService;
pub use in_flight::InFlightSet;
pub use reaction_service::ReactionService;
