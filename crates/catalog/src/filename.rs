//! Filename → display title normalization.

const COMPLETION_PREFIX: &str = "CertificateOfCompletion";
const CERTIFICATION_PREFIX: &str = "Certification of Completion";
const DUPLICATE_MARKER: &str = "(1)";

/// Turn a raw certificate filename into a human-readable title.
///
/// Steps, in order: drop the trailing extension, underscores become spaces,
/// whitespace runs collapse to one space, `(1)` download markers are removed,
/// the `CertificateOfCompletion` / `Certification of Completion -` boilerplate
/// is stripped (case-insensitive), and the result is trimmed.
///
/// Never fails; a filename made only of boilerplate yields an empty string.
pub fn prettify_filename(filename: &str) -> String {
    let stem = strip_extension(filename);
    let spaced = stem.replace('_', " ");
    let collapsed = collapse_whitespace(&spaced);
    let unmarked = collapsed.replace(DUPLICATE_MARKER, "");

    let mut rest = unmarked.as_str();
    if let Some(tail) = strip_prefix_ignore_case(rest, COMPLETION_PREFIX) {
        rest = tail.trim_start();
    }
    if let Some(tail) = strip_certification_prefix(rest) {
        rest = tail;
    }
    rest.trim().to_string()
}

/// Remove the last `.ext` suffix. The suffix must be non-empty and may not
/// cross a path separator.
fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => {
            let ext = &filename[idx + 1..];
            if ext.is_empty() || ext.contains('/') {
                filename
            } else {
                &filename[..idx]
            }
        }
        None => filename,
    }
}

fn collapse_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;
    for ch in value.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&value[prefix.len()..])
    } else {
        None
    }
}

// "Certification of Completion" + optional spaces + "-" + optional spaces
fn strip_certification_prefix(value: &str) -> Option<&str> {
    let tail = strip_prefix_ignore_case(value, CERTIFICATION_PREFIX)?;
    let tail = tail.trim_start().strip_prefix('-')?;
    Some(tail.trim_start())
}
