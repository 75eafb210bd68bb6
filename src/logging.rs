use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Route `log` output to `path`, filtered by `RUST_LOG` (default `info`).
///
/// The terminal is owned by the TUI, so nothing is ever written to stderr.
/// Failing to open the file leaves logging disabled.
pub fn init_file_logging(path: &Path) {
    let file = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(path));

    match file {
        Ok(file) => {
            let _ = Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .try_init();
        }
        Err(e) => {
            eprintln!("kobun: logging disabled ({}: {e})", path.display());
        }
    }
}
