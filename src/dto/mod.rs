pub mod auth;
pub mod events;
pub mod feedback;
pub mod outfits;
pub mod packages;
pub mod suppliers;
pub mod users;
pub mod wishlist;
