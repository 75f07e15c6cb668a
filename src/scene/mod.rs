pub mod camera;
pub mod projection;
pub mod world;

pub use projection::{project, Category};
pub use world::SceneState;
