use std::io::Write;

pub fn version() -> String {
    format!("v{}", env!("CARGO_PKG_VERSION"))
}

pub fn write_version<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Jsonnet debugger {}", version())
}
