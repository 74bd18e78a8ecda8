//! Section merge logic
//!
//! Merge semantics, applied layer by layer:
//! - Sections: added wholesale on first appearance
//! - Options: later layer overwrites the same key, other keys survive
//! - Autoexec: never merged here, it is appended by the caller

use log::debug;

use super::source::{Sections, AUTOEXEC_SECTION};

/// Merge `overlay` into `base`.
pub fn merge_sections(base: &mut Sections, overlay: Sections) {
    for (name, options) in overlay {
        if name == AUTOEXEC_SECTION {
            continue;
        }
        match base.get_mut(&name) {
            Some(existing) => {
                for (key, value) in options {
                    debug!("[{}] {}={}", name, key, value);
                    existing.insert(key, value);
                }
            }
            None => {
                debug!("[{}] added with {} option(s)", name, options.len());
                base.insert(name, options);
            }
        }
    }
}

/// Merge multiple layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Sections>) -> Sections {
    layers.into_iter().fold(Sections::new(), |mut acc, layer| {
        merge_sections(&mut acc, layer);
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::Section;

    fn layer(entries: &[(&str, &[(&str, &str)])]) -> Sections {
        entries
            .iter()
            .map(|(name, opts)| {
                let section: Section = opts
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                (name.to_string(), section)
            })
            .collect()
    }

    #[test]
    fn test_option_override() {
        let mut base = layer(&[("cpu", &[("core", "auto")])]);
        merge_sections(&mut base, layer(&[("cpu", &[("core", "dynamic")])]));
        assert_eq!(base["cpu"]["core"], "dynamic");
    }

    #[test]
    fn test_untouched_options_survive() {
        let mut base = layer(&[("cpu", &[("core", "auto"), ("cycles", "max")])]);
        merge_sections(&mut base, layer(&[("cpu", &[("core", "normal")])]));

        assert_eq!(base["cpu"]["core"], "normal");
        assert_eq!(base["cpu"]["cycles"], "max");
    }

    #[test]
    fn test_untouched_section_survives() {
        let mut base = layer(&[("dos", &[("xms", "false"), ("ems", "true")])]);
        let before = base["dos"].clone();
        merge_sections(&mut base, layer(&[("cpu", &[("core", "auto")])]));

        assert_eq!(base["dos"], before);
        assert_eq!(base["cpu"]["core"], "auto");
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut base = layer(&[("sblaster", &[("irq", "5")])]);
        merge_sections(&mut base, layer(&[("sblaster", &[("IRQ", "7")])]));

        assert_eq!(base["sblaster"]["irq"], "5");
        assert_eq!(base["sblaster"]["IRQ"], "7");
    }

    #[test]
    fn test_autoexec_section_is_ignored() {
        let mut base = Sections::new();
        merge_sections(&mut base, layer(&[("autoexec", &[("mount c", "")])]));
        assert!(base.is_empty());
    }

    #[test]
    fn test_merge_layers() {
        let file1 = layer(&[("cpu", &[("core", "auto")]), ("dos", &[("umb", "true")])]);
        let file2 = layer(&[("cpu", &[("core", "dynamic")])]);
        let tweak = layer(&[("sblaster", &[("force_irq", "5")])]);

        let result = merge_layers(vec![file1, file2, tweak]);

        assert_eq!(result["cpu"]["core"], "dynamic");
        assert_eq!(result["dos"]["umb"], "true");
        assert_eq!(result["sblaster"]["force_irq"], "5");
    }
}
