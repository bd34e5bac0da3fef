//! The components module contains all shared components for our app.

mod app;
pub mod audio_manager;
mod gallery;
mod icons;
mod player;
pub mod release_modal;
#[cfg(test)]
mod test_dom;
mod web;

pub use app::*;
pub use gallery::*;
pub use icons::*;
pub use player::*;
