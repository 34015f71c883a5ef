pub(crate) mod gradient;
pub(crate) mod space;
pub(crate) mod themes;
