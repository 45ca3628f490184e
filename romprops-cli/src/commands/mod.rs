pub(crate) mod config;
pub(crate) mod info;
pub(crate) mod list;
pub(crate) mod scan;
pub(crate) mod thumb;
pub(crate) mod urls;
