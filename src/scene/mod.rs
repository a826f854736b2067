pub(crate) mod bouncing_balls;
pub(crate) mod config;
pub(crate) mod document;
pub(crate) mod moving_camera;
pub(crate) mod planet;
pub(crate) mod registry;
