//! User configuration file.

use std::path::Path;

use log::debug;

use super::templates::{render, COMMENT_SECTION, RENDER_SECTION_TEMPLATE, SDL_SECTION_TEMPLATE};
use super::{persist, WriteError};
use crate::autoexec::AutoexecRewriter;
use crate::config::ResolvedConfig;

/// Options in `[render]` shown only as comments. Publishers often pick poor
/// values; the auto file supplies these instead.
const COMMENTED_RENDER_OPTIONS: &[&str] = &["scaler", "aspect"];

/// Options in `[render]` dropped entirely.
const HIDDEN_RENDER_OPTIONS: &[&str] = &["frameskip"];

/// Render the user configuration file.
pub fn render_user_conf(
    conf: &ResolvedConfig,
    dosbox_args: &[String],
    rewriter: &AutoexecRewriter<'_>,
) -> String {
    let echoed = format!("{:?}", dosbox_args);
    let mut out = render(COMMENT_SECTION, &[("args", echoed.as_str())]);
    out.push_str(SDL_SECTION_TEMPLATE);

    if let Some(options) = conf.section("render") {
        out.push_str(RENDER_SECTION_TEMPLATE);
        for (key, value) in options {
            if HIDDEN_RENDER_OPTIONS.contains(&key.as_str()) {
                debug!("Dropping [render] {}={}", key, value);
                continue;
            }
            if COMMENTED_RENDER_OPTIONS.contains(&key.as_str()) {
                out.push_str(&format!("# {}={}\n", key, value));
                continue;
            }
            out.push_str(&format!("{}={}\n", key, value));
        }
        out.push('\n');
    }

    out.push_str("[autoexec]\n");
    for line in rewriter.rewrite(conf.autoexec()) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Render and write the user configuration file in the resolved encoding.
pub fn write_user_conf(
    path: &Path,
    conf: &ResolvedConfig,
    dosbox_args: &[String],
    rewriter: &AutoexecRewriter<'_>,
) -> Result<(), WriteError> {
    let text = render_user_conf(conf, dosbox_args, rewriter);
    persist(path, &text, conf.encoding)
}
