mod golang;
pub(crate) mod utils;
