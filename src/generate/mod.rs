pub(crate) mod backend;
pub(crate) mod prompt;
pub(crate) mod strategy;
