
pub(crate) mod array;
