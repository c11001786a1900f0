pub mod card;
pub mod character;

pub use card::Card;
pub use character::Character;
