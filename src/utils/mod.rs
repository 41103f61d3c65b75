pub mod date;
pub mod io;
pub mod text;

pub use io::{is_stdin_tty, read_stdin};
