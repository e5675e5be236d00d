pub(crate) mod bounds;
pub(crate) mod field;
pub(crate) mod motion;
