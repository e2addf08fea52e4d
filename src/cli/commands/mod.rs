pub mod settings;

pub use settings::{
    get_command, menu_command, reset_command, set_command, show_command, toggle_command,
    update_command,
};
