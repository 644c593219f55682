pub(crate) mod app;
pub(crate) mod logging;
pub(crate) mod persistence;
pub(crate) mod scenario;
