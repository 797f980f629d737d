pub(crate) mod host;
pub(crate) mod script;
