use std::io::Write;

use crate::{
    core::{
        types::{Config, Input, LogLevel, Mode},
        version::write_version,
    },
    error::AppError,
};

/// Terminal outcome of argument processing.
#[derive(Debug)]
pub enum Parsed {
    /// Arguments are complete; launch with this configuration.
    Continue(Config),
    /// `--help`: usage goes to stdout, exit 0.
    ShowUsage,
    /// Missing input: the error, a blank line and usage go to stderr, exit 1.
    UsageError(AppError),
    /// Everything was already printed (`--version`), exit 0.
    Exit,
    Failed(AppError),
}

pub fn write_usage<W: Write>(out: &mut W) -> std::io::Result<()> {
    write_version(out)?;
    writeln!(out)?;
    writeln!(out, "jsonnice {{<option>}} {{ <filename> }}")?;
    writeln!(out)?;
    writeln!(out, "Available options:")?;
    writeln!(out, "  -h / --help                This message")?;
    writeln!(out, "  -e / --exec                Treat filename as code")?;
    writeln!(out, "  -J / --jpath <dir>         Specify an additional library search dir")?;
    writeln!(out, "  -d / --dap                 Start a debug-adapter-protocol server")?;
    writeln!(out, "  -l / --log-level           Set the log level. Allowed values: debug,info,warn,error")?;
    writeln!(out, "  -v / --version             Print version")?;
    writeln!(out)?;
    writeln!(out, "In all cases:")?;
    writeln!(out, "  <filename> can be - (stdin)")?;
    writeln!(out, "  Multichar options are expanded e.g. -abc becomes -a -b -c.")?;
    writeln!(out, "  The -- option suppresses option processing for subsequent arguments.")?;
    writeln!(out, "  Note that since filenames and jsonnet programs can begin with -, it is")?;
    writeln!(out, "  advised to use -- if the argument is unknown, e.g. jsonnice -- \"$FILENAME\".")?;
    Ok(())
}

/// Expands clustered short options: `-abc` becomes `-a -b -c`.
/// Everything from the first `--` on is copied untouched.
pub fn simplify_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len() * 2);
    for (i, arg) in args.iter().enumerate() {
        if arg == "--" {
            out.extend(args[i..].iter().cloned());
            break;
        }
        let mut chars = arg.chars();
        let is_cluster =
            arg.chars().count() > 2 && chars.next() == Some('-') && chars.next() != Some('-');
        if is_cluster {
            out.extend(arg.chars().skip(1).map(|c| format!("-{c}")));
        } else {
            out.push(arg.clone());
        }
    }
    out
}

/// Advances the cursor to the flag's argument. `None` when the flag is last.
fn next_arg<'a>(i: &mut usize, args: &'a [String]) -> Option<&'a str> {
    if *i + 1 >= args.len() {
        return None;
    }
    *i += 1;
    Some(args[*i].as_str())
}

/// Mutable record filled in while scanning tokens.
#[derive(Debug, Default)]
struct ScanState {
    filename_is_code: bool,
    dap: bool,
    search_paths: Vec<String>,
    log_level: Option<LogLevel>,
    positional: Vec<String>,
}

impl ScanState {
    fn into_config(self) -> Parsed {
        let ScanState {
            filename_is_code,
            dap,
            search_paths,
            log_level,
            mut positional,
        } = self;
        let log_level_explicit = log_level.is_some();
        let log_level = log_level.unwrap_or_default();

        if dap {
            return Parsed::Continue(Config {
                mode: Mode::Dap,
                search_paths,
                log_level,
                log_level_explicit,
            });
        }

        let want = if filename_is_code { "code" } else { "filename" };
        let token = match positional.len() {
            0 => return Parsed::UsageError(AppError::MissingInput(want)),
            1 => positional.remove(0),
            _ => panic!("internal error: expected a single input file"),
        };
        let input = if filename_is_code {
            Input::Code(token)
        } else {
            Input::File(token)
        };

        Parsed::Continue(Config {
            mode: Mode::Repl(input),
            search_paths,
            log_level,
            log_level_explicit,
        })
    }
}

/// Processes the raw arguments (without the program name). `--version`
/// writes the version line to `out` before returning.
pub fn parse<W: Write>(given: &[String], out: &mut W) -> Parsed {
    let args = simplify_args(given);
    let mut state = ScanState::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => return Parsed::ShowUsage,
            "-v" | "--version" => {
                let _ = write_version(out);
                return Parsed::Exit;
            }
            "-e" | "--exec" => state.filename_is_code = true,
            "--" => {
                state.positional.extend(args[i + 1..].iter().cloned());
                break;
            }
            "-J" | "--jpath" => match next_arg(&mut i, &args) {
                Some(dir) if !dir.is_empty() => state.search_paths.push(dir.to_string()),
                _ => return Parsed::Failed(AppError::EmptyJpath),
            },
            "-d" | "--dap" => state.dap = true,
            "-l" | "--log-level" => {
                let level = match next_arg(&mut i, &args) {
                    Some(level) if !level.is_empty() => level,
                    _ => return Parsed::Failed(AppError::MissingLogLevel),
                };
                match level.parse::<LogLevel>() {
                    Ok(level) => state.log_level = Some(level),
                    Err(e) => return Parsed::Failed(e),
                }
            }
            _ if arg.len() > 1 && arg.starts_with('-') => {
                return Parsed::Failed(AppError::UnrecognizedArgument(arg.to_string()));
            }
            _ => state.positional.push(arg.to_string()),
        }
        i += 1;
    }

    state.into_config()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn run(v: &[&str]) -> (Parsed, String) {
        let mut out = Vec::new();
        let parsed = parse(&args(v), &mut out);
        (parsed, String::from_utf8(out).unwrap())
    }

    fn config(v: &[&str]) -> Config {
        match run(v).0 {
            Parsed::Continue(c) => c,
            other => panic!("expected Continue for {v:?}, got {other:?}"),
        }
    }

    fn failure(v: &[&str]) -> AppError {
        match run(v).0 {
            Parsed::Failed(e) => e,
            other => panic!("expected Failed for {v:?}, got {other:?}"),
        }
    }

    #[test]
    fn simplify_expands_clusters() {
        assert_eq!(simplify_args(&args(&["-ed"])), args(&["-e", "-d"]));
        assert_eq!(
            simplify_args(&args(&["-abc", "x", "--jpath", "-"])),
            args(&["-a", "-b", "-c", "x", "--jpath", "-"])
        );
    }

    #[test]
    fn simplify_stops_at_double_dash() {
        assert_eq!(
            simplify_args(&args(&["-ed", "--", "-xy"])),
            args(&["-e", "-d", "--", "-xy"])
        );
    }

    #[test]
    fn simplify_leaves_short_tokens_alone() {
        assert_eq!(simplify_args(&args(&["-", "-e", "--x"])), args(&["-", "-e", "--x"]));
    }

    #[test]
    fn help_halts_regardless_of_later_tokens() {
        assert!(matches!(run(&["--help", "--bogus"]).0, Parsed::ShowUsage));
        assert!(matches!(run(&["-e", "-h", "-J"]).0, Parsed::ShowUsage));
        assert!(matches!(run(&["-eh"]).0, Parsed::ShowUsage));
    }

    #[test]
    fn version_prints_and_exits() {
        let (parsed, out) = run(&["--version"]);
        assert!(matches!(parsed, Parsed::Exit));
        assert!(out.starts_with("Jsonnet debugger v"));

        let (parsed, out) = run(&["-v", "-h"]);
        assert!(matches!(parsed, Parsed::Exit));
        assert!(!out.is_empty());
    }

    #[test]
    fn help_writes_nothing_during_parse() {
        let (_, out) = run(&["-h"]);
        assert!(out.is_empty());
    }

    #[test]
    fn exec_with_double_dash() {
        let c = config(&["-e", "--", "1+1"]);
        assert!(c.filename_is_code());
        assert_eq!(c.input_file(), "1+1");
        assert_eq!(c.mode, Mode::Repl(Input::Code("1+1".into())));
    }

    #[test]
    fn double_dash_freezes_flags() {
        let c = config(&["--", "-e"]);
        assert!(!c.filename_is_code());
        assert_eq!(c.input_file(), "-e");
    }

    #[test]
    fn plain_file() {
        let c = config(&["main.jsonnet"]);
        assert_eq!(c.mode, Mode::Repl(Input::File("main.jsonnet".into())));
        assert_eq!(c.log_level, LogLevel::Error);
        assert!(c.search_paths.is_empty());
    }

    #[test]
    fn single_dash_is_positional() {
        assert_eq!(config(&["-"]).input_file(), "-");
    }

    #[test]
    fn jpath_accumulates_in_order() {
        let c = config(&["-J", "a", "--jpath", "b", "-J", "a", "f.jsonnet"]);
        assert_eq!(c.search_paths, args(&["a", "b", "a"]));
    }

    #[test]
    fn jpath_empty_or_missing_fails() {
        let e = failure(&["-J", "", "foo.jsonnet"]);
        assert!(e.to_string().contains("empty string"));
        let e = failure(&["foo.jsonnet", "-J"]);
        assert!(matches!(e, AppError::EmptyJpath));
    }

    #[test]
    fn jpath_takes_next_token_even_if_flag_like() {
        let c = config(&["-J", "-d", "f.jsonnet"]);
        assert_eq!(c.search_paths, args(&["-d"]));
        assert_ne!(c.mode, Mode::Dap);
    }

    #[test]
    fn log_level_values() {
        assert_eq!(config(&["-l", "debug", "f"]).log_level, LogLevel::Debug);
        assert_eq!(config(&["--log-level", "info", "f"]).log_level, LogLevel::Info);
        assert_eq!(config(&["-l", "warn", "f"]).log_level, LogLevel::Warn);
        assert_eq!(
            config(&["-l", "debug", "-l", "error", "f"]).log_level,
            LogLevel::Error
        );
    }

    #[test]
    fn log_level_bogus_is_rejected() {
        let e = failure(&["--log-level", "bogus", "f"]);
        let msg = e.to_string();
        assert!(msg.contains("bogus"), "{msg}");
        assert!(msg.contains("debug,info,warn,error"), "{msg}");
    }

    #[test]
    fn log_level_defaults_to_error_unless_given() {
        let c = config(&["f"]);
        assert_eq!(c.log_level, LogLevel::Error);
        assert!(!c.log_level_explicit);

        let c = config(&["-l", "error", "f"]);
        assert_eq!(c.log_level, LogLevel::Error);
        assert!(c.log_level_explicit);
    }

    #[test]
    fn log_level_is_case_sensitive() {
        assert!(matches!(failure(&["-l", "DEBUG", "f"]), AppError::InvalidLogLevel(_)));
    }

    #[test]
    fn log_level_missing() {
        assert!(matches!(failure(&["f", "-l"]), AppError::MissingLogLevel));
        assert!(matches!(failure(&["-l", "", "f"]), AppError::MissingLogLevel));
    }

    #[test]
    fn unknown_flag() {
        let e = failure(&["--bogus", "f"]);
        assert_eq!(e.to_string(), "unrecognized argument: --bogus");
        let e = failure(&["-ex", "f"]);
        assert_eq!(e.to_string(), "unrecognized argument: -x");
    }

    #[test]
    fn missing_filename() {
        match run(&[]).0 {
            Parsed::UsageError(e) => assert_eq!(e.to_string(), "must give filename"),
            other => panic!("unexpected {other:?}"),
        }
        match run(&["-e"]).0 {
            Parsed::UsageError(e) => assert_eq!(e.to_string(), "must give code"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(run(&["--"]).0, Parsed::UsageError(AppError::MissingInput("filename"))));
    }

    #[test]
    fn dap_needs_no_filename() {
        let c = config(&["--dap"]);
        assert_eq!(c.mode, Mode::Dap);
        assert_eq!(c.input_file(), "");
    }

    #[test]
    fn dap_keeps_search_paths_and_level() {
        let c = config(&["-d", "-J", "lib", "-l", "info"]);
        assert_eq!(c.mode, Mode::Dap);
        assert_eq!(c.search_paths, args(&["lib"]));
        assert_eq!(c.log_level, LogLevel::Info);
    }

    #[test]
    fn dap_still_fails_on_bad_flags() {
        assert!(matches!(failure(&["-d", "--nope"]), AppError::UnrecognizedArgument(_)));
    }

    #[test]
    fn clustered_flags_match_separate_flags() {
        let clustered = config(&["-ed"]);
        let separate = config(&["-e", "-d"]);
        assert_eq!(clustered, separate);
    }

    #[test]
    #[should_panic(expected = "expected a single input file")]
    fn two_positionals_abort() {
        let _ = run(&["a.jsonnet", "b.jsonnet"]);
    }

    #[test]
    fn usage_lists_every_flag() {
        let mut buf = Vec::new();
        write_usage(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        for flag in ["--help", "--exec", "--jpath", "--dap", "--log-level", "--version"] {
            assert!(text.contains(flag), "usage missing {flag}");
        }
        assert!(text.starts_with("Jsonnet debugger "));
    }
}
