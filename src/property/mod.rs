pub(crate) mod animated;
pub(crate) mod frame;
pub(crate) mod node;
pub(crate) mod run;
pub(crate) mod sequence;
