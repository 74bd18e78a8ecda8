//! DOSBox argv parser.

use crate::args::DosboxArgs;
use crate::error::ArgvError;

/// Flags that take exactly one value.
const FLAGS_WITH_VALUES: &[&str] = &["-conf"];

/// Flags whose value is optional (`-c` may be given bare).
const FLAGS_WITH_OPTIONAL_VALUES: &[&str] = &["-c"];

/// Boolean switches.
const BOOLEAN_FLAGS: &[&str] = &["-noautoexec", "-noconsole", "-fullscreen", "-exit"];

fn is_flag(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-')
}

fn known_flags() -> impl Iterator<Item = &'static str> {
    FLAGS_WITH_VALUES
        .iter()
        .chain(FLAGS_WITH_OPTIONAL_VALUES)
        .chain(BOOLEAN_FLAGS)
        .copied()
}

/// Resolve a flag word to its canonical flag and any value attached to it.
///
/// Accepted spellings, in order:
/// - the exact flag (`-conf`)
/// - the exact flag with `=value` (`-conf=game.conf`)
/// - a unique prefix of one flag (`-noauto`)
/// - a two-character flag with its value glued on (`-cexit`)
///
/// A word matching more than one flag by the last two rules is ambiguous.
fn resolve_flag(arg: &str) -> Result<(&'static str, Option<String>), ArgvError> {
    if let Some(flag) = known_flags().find(|f| *f == arg) {
        return Ok((flag, None));
    }
    if let Some((name, value)) = arg.split_once('=') {
        if let Some(flag) = known_flags().find(|f| *f == name) {
            return Ok((flag, Some(value.to_string())));
        }
    }

    let mut matches: Vec<(&'static str, Option<String>)> = Vec::new();
    for flag in known_flags() {
        if flag.len() == 2 && arg.starts_with(flag) {
            matches.push((flag, Some(arg[flag.len()..].to_string())));
        } else if flag.starts_with(arg) {
            matches.push((flag, None));
        }
    }

    match matches.len() {
        0 => Err(ArgvError::UnknownFlag(arg.to_string())),
        1 => Ok(matches.remove(0)),
        _ => Err(ArgvError::AmbiguousFlag {
            arg: arg.to_string(),
            candidates: matches
                .iter()
                .map(|(f, _)| *f)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Parse a DOSBox argument list (not including the program name).
///
/// The list is taken as already split into words; no shell quoting is
/// interpreted here. Values may follow their flag as the next word or be
/// attached to it (`-conf=game.conf`, `-cexit`); flags may be abbreviated
/// to any unique prefix (`-noauto`).
pub fn parse_argv(argv: &[String]) -> Result<DosboxArgs, ArgvError> {
    let mut parsed = DosboxArgs::default();
    let mut i = 0;

    while i < argv.len() {
        let arg = &argv[i];

        if !is_flag(arg) {
            if parsed.file.is_some() {
                return Err(ArgvError::ExtraPositional(arg.clone()));
            }
            parsed.file = Some(arg.clone());
            i += 1;
            continue;
        }

        let (flag, inline) = resolve_flag(arg)?;

        if BOOLEAN_FLAGS.contains(&flag) {
            if inline.is_some() {
                return Err(ArgvError::UnexpectedValue(flag.to_string()));
            }
            match flag {
                "-noautoexec" => parsed.noautoexec = true,
                "-noconsole" => parsed.noconsole = true,
                "-fullscreen" => parsed.fullscreen = true,
                _ => parsed.exit = true,
            }
            i += 1;
            continue;
        }

        if FLAGS_WITH_VALUES.contains(&flag) {
            let value = match inline {
                Some(v) => {
                    i += 1;
                    v
                }
                None => match argv.get(i + 1) {
                    Some(next) if !is_flag(next) => {
                        i += 2;
                        next.clone()
                    }
                    _ => return Err(ArgvError::MissingValue(flag.to_string())),
                },
            };
            parsed.conf.push(value);
            continue;
        }

        if FLAGS_WITH_OPTIONAL_VALUES.contains(&flag) {
            let value = match inline {
                Some(v) => {
                    i += 1;
                    Some(v)
                }
                None => match argv.get(i + 1) {
                    Some(next) if !is_flag(next) => {
                        i += 2;
                        Some(next.clone())
                    }
                    _ => {
                        i += 1;
                        None
                    }
                },
            };
            // Blank commands carry nothing to run.
            if let Some(cmd) = value.filter(|v| !v.is_empty()) {
                parsed.commands.push(cmd);
            }
            continue;
        }

        return Err(ArgvError::UnknownFlag(arg.clone()));
    }

    Ok(parsed)
}
