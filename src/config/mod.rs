pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::*;
pub use utils::{
    load_config, load_config_from_path, reload_config_from_path, with_config, CONFIG,
    CONFIG_FILE_PATH,
};
