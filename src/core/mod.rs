pub mod availability;
pub mod default_deck;
pub mod errors;
pub mod game;
pub mod hints;
pub mod loader;
pub mod models;
pub mod repository;
pub mod session;
pub mod shuffle;
pub mod tasks;

pub use errors::QuizError;
pub use hints::compute_hints;
pub use models::{
    deck_name_from_source,
    parse_cards,
    Card,
    Directory,
};
pub use repository::CardRepository;
pub use session::QuizSession;
