pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod resample;
pub(crate) mod vector;
