pub(crate) mod bridge;
pub(crate) mod config;
pub(crate) mod continuation;
pub(crate) mod machine;
pub(crate) mod observer;
