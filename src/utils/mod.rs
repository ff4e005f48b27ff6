pub(crate) mod fs;
pub(crate) mod timezone;

pub(crate) use fs::{temp_path, write_atomic};
pub(crate) use timezone::Timezone;
