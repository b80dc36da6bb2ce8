mod args;

pub use args::{config_to_command, parse_args, write_completion};

#[cfg(test)]
pub use args::parse_args_from;
