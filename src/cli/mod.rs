mod commands;
mod handlers;

pub use commands::{AddArgs, Cli, Commands, GlobalArgs, LocalAction, LocalCommand};
pub use handlers::{
    handle_add, handle_delete, handle_get, handle_list, handle_local_add, handle_local_clear,
    handle_local_delete, handle_local_list, handle_move, Context,
};
