pub(crate) mod accel;
pub(crate) mod bounce;
pub(crate) mod lerp;
