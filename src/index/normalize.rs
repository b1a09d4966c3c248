//! Turns raw archive entry names into qualified class names.

const CLASS_SUFFIX: &str = ".class";

/// Converts a zip entry name like `java/io/File.class` into a qualified
/// class name like `java.io.File`, or `None` when the entry is not a
/// usable top-level class.
///
/// Inner classes collapse to their enclosing class (`Outer$Inner` becomes
/// `Outer`) and anonymous classes (`Outer$1`) collapse the same way.
/// Entries whose name is entirely lowercase or dots are compiler
/// artifacts, not classes, and are dropped.
pub fn qualified_from_entry(entry_name: &str) -> Option<String> {
    let stem = strip_suffix_ignore_case(entry_name, CLASS_SUFFIX)?;

    let mut name = stem.replace('/', ".");

    // A trailing "$<digit>" is an anonymous class marker.
    let bytes = name.as_bytes();
    if bytes.len() >= 2
        && bytes[bytes.len() - 2] == b'$'
        && bytes[bytes.len() - 1].is_ascii_digit()
    {
        name.truncate(name.len() - 2);
    }

    if let Some(pos) = name.find('$') {
        name.truncate(pos);
    }

    if name.is_empty() {
        return None;
    }

    if name.chars().all(|c| c.is_lowercase() || c == '.') {
        return None;
    }

    Some(name)
}

/// The final dot-segment of a qualified path, or the whole path when it
/// has no package.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    // Resource entry names may be arbitrary UTF-8; splitting inside a
    // multibyte character would panic.
    if !name.is_char_boundary(split) {
        return None;
    }
    let (stem, tail) = name.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}
