use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};

/// Single-line JSON envelope on stdout; logs stay on stderr.
pub fn print_result<T: Serialize>(op: &str, result: &T) -> Result<()> {
    let env = json!({ "op": op, "result": result });
    let mut out = io::stdout();
    serde_json::to_writer(&mut out, &env)?;
    writeln!(&mut out)?;
    Ok(())
}
