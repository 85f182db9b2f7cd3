//! Netlist name escaping helpers.
//!
//! Timing engines emit hierarchical names with a backslash escape before
//! `[`, `]`, `/`, and `\`. Reports and the transformation log store the
//! unescaped form. [`unescape_name`] applies the four replacements in a
//! fixed order; [`escape_name`] is its inverse over names drawn from the
//! netlist identifier alphabet.

/// Removes engine-internal escapes from a hierarchical name.
///
/// Replaces `\[`, `\]`, `\/`, and `\\` with `[`, `]`, `/`, and `\`,
/// in that order.
pub fn unescape_name(name: &str) -> String {
    name.replace("\\[", "[")
        .replace("\\]", "]")
        .replace("\\/", "/")
        .replace("\\\\", "\\")
}

/// Escapes a hierarchical name the way the timing engine emits it.
///
/// The backslash replacement runs first so that escapes added for the
/// bracket and slash characters are not themselves re-escaped.
pub fn escape_name(name: &str) -> String {
    name.replace('\\', "\\\\")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .replace('/', "\\/")
}
