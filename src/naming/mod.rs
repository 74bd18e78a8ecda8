//! Cache keys and generated file names.
//!
//! Generated configuration files are named after a short key derived from
//! the game identity and its DOSBox arguments, so that the same launch always
//! maps to the same file. The salt is bumped whenever the generated format
//! changes, which makes files from older releases unreachable; `gc` removes
//! them.

mod gc;

pub use gc::{cleanup_old_conf_files, LEGACY_CONF_NAMES};

use sha1::{Digest, Sha1};

/// Number of hex characters kept from the digest.
pub const KEY_LEN: usize = 6;

/// Prefix of current generated file names.
pub const CONF_PREFIX: &str = "boxtron";

/// Salt of the current naming scheme.
pub const CONF_SALT: &str = "v2";

/// Name of the environment-derived file rewritten on every run.
pub const AUTO_CONF_NAME: &str = "boxtron_auto.conf";

/// Derive a short key from an identity, its arguments and a salt.
///
/// The inputs are concatenated without separators and hashed; the first
/// [`KEY_LEN`] lowercase hex characters of the digest are returned.
pub fn cache_key<S: AsRef<str>>(identity: &str, args: &[S], salt: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(identity.as_bytes());
    for arg in args {
        hasher.update(arg.as_ref().as_bytes());
    }
    hasher.update(salt.as_bytes());
    let mut key = hex::encode(hasher.finalize());
    key.truncate(KEY_LEN);
    key
}

/// File name for `identity` and `args` under a given prefix and salt.
pub fn conf_name_salted<S: AsRef<str>>(
    prefix: &str,
    identity: &str,
    args: &[S],
    salt: &str,
) -> String {
    format!("{}_{}_{}.conf", prefix, identity, cache_key(identity, args, salt))
}

/// File name of the user configuration for `identity` and `args`.
pub fn uniq_conf_name<S: AsRef<str>>(identity: &str, args: &[S]) -> String {
    conf_name_salted(CONF_PREFIX, identity, args, CONF_SALT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(s: &str) -> Vec<String> {
        s.split_whitespace().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_key_matches_plain_sha1_prefix() {
        // sha1("abc") = a9993e364706816aba3e25717850c26c9cd0d89d
        assert_eq!(cache_key::<&str>("abc", &[], ""), "a9993e");
        assert_eq!(cache_key("a", &["b"], "c"), "a9993e");
    }

    #[test]
    fn test_key_is_deterministic() {
        let args = argv("-conf dosbox.conf -c exit");
        let first = cache_key("2280", &args, CONF_SALT);
        let second = cache_key("2280", &args, CONF_SALT);
        assert_eq!(first, second);
        assert_eq!(first.len(), KEY_LEN);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_salt_changes_key() {
        let args = argv("-conf dosbox.conf -noconsole");
        for id in ["2280", "2300", "9000", "1234567"] {
            let v1 = cache_key(id, &args, "v1");
            let v2 = cache_key(id, &args, "v2");
            assert_ne!(v1, v2, "salt must change key for {id}");
        }
    }

    #[test]
    fn test_extra_command_changes_key() {
        let base = argv("-conf game.conf -noconsole");
        let mut extended = base.clone();
        extended.push("-c".to_string());
        extended.push("exit".to_string());
        assert_ne!(cache_key("2280", &base, "v2"), cache_key("2280", &extended, "v2"));
    }

    #[test]
    fn test_conf_name_format() {
        let args = argv("-conf game.conf");
        let name = uniq_conf_name("2280", &args);
        assert!(name.starts_with("boxtron_2280_"));
        assert!(name.ends_with(".conf"));
        assert_eq!(name.len(), "boxtron_2280_".len() + KEY_LEN + ".conf".len());
        assert_eq!(name, conf_name_salted("boxtron", "2280", &args, "v2"));
    }
}
