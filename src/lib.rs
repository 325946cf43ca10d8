pub mod game;
pub mod maze;
pub mod render;
