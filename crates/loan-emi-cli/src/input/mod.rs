pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Command input from `--input`, else from piped stdin. `None` means the
/// command should build its input from flags.
pub fn load<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => file::read_input(path).map(Some),
        None => stdin::read_stdin(),
    }
}
