use std::{io::Read, path::PathBuf};

use crate::error::{AppError, AppResult};

pub const CMDLINE_NAME: &str = "<cmdline>";
pub const STDIN_NAME: &str = "<stdin>";

/// Loads the program text. `filename` is rewritten to the display name used
/// by the debugger (`<cmdline>` for inline code, `<stdin>` for `-`).
pub fn read_input(filename_is_code: bool, filename: &mut String) -> AppResult<String> {
    read_input_from(filename_is_code, filename, std::io::stdin().lock())
}

pub fn read_input_from<R: Read>(
    filename_is_code: bool,
    filename: &mut String,
    mut stdin: R,
) -> AppResult<String> {
    if filename_is_code {
        let code = std::mem::replace(filename, CMDLINE_NAME.to_string());
        return Ok(code);
    }

    if filename == "-" {
        let mut text = String::new();
        stdin
            .read_to_string(&mut text)
            .map_err(|source| AppError::InputRead {
                path: PathBuf::from(STDIN_NAME),
                source,
            })?;
        *filename = STDIN_NAME.to_string();
        return Ok(text);
    }

    let path = PathBuf::from(filename.as_str());
    let mut file = std::fs::File::open(&path).map_err(|source| AppError::InputOpen {
        path: path.clone(),
        source,
    })?;
    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|source| AppError::InputRead { path, source })?;
    Ok(text)
}

/// Directory that library imports of `filename` resolve against: everything
/// before the last separator, so `a/` yields `a` rather than `.`.
pub fn containing_dir(filename: &str) -> String {
    let Some(i) = filename.rfind(std::path::is_separator) else {
        return ".".to_string();
    };
    let dir = filename[..i].trim_end_matches(std::path::is_separator);
    if dir.is_empty() {
        filename[..1].to_string()
    } else {
        dir.to_string()
    }
}
