// Library entry so integration tests and the (external) bot routing layer can
// reference the engine's modules directly.
pub mod card;
pub mod config;
pub mod constants;
pub mod database;
pub mod deck;
pub mod drawer;
pub mod error;
pub mod history;
pub mod interpretation;
pub mod model;
pub mod quota;
pub mod service;
pub mod spread;

// Convenient re-exports for the types most callers touch.
pub use card::{Arcana, Card, CardId, Rank, Suit};
pub use config::FortuneConfig;
pub use error::FortuneError;
pub use model::{DrawRecord, DrawnCard, FortuneStats, UserFortuneProfile};
pub use service::{DrawOutcome, DrawRequest, DrawResult, FortuneService};
pub use spread::SpreadType;
