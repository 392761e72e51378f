//! Navigation state, keyboard handling and text rendering.
pub mod app;
pub mod components;
pub mod nav;
pub mod render;
pub mod resize;
pub mod route;
pub mod shortcuts;
