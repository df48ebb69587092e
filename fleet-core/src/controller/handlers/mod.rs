pub mod launch_template_handler;
pub mod navigation_handler;
pub mod scaling_handler;
pub mod search_handler;
pub mod view_handler;

pub mod utils;
pub use utils::*;
