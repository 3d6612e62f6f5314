use anyhow::Context;
use std::io::Read;

/// Path token that selects standard input instead of a file.
pub const STDIN_TOKEN: &str = "-";

/// Read one input source fully: a file path, or standard input for `-`.
pub fn read_input(path: &str) -> anyhow::Result<Vec<u8>> {
    if path == STDIN_TOKEN {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("read standard input")?;
        return Ok(buffer);
    }
    std::fs::read(path).with_context(|| format!("unable to open file {path}"))
}
