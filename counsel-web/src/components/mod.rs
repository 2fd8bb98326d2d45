pub mod about;
pub mod booking;
pub mod footer;
pub mod header;
pub mod hero;
pub mod how_it_works;
pub mod icons;
pub mod media;
pub mod modal;
pub mod services;
