//! Read-only lookups against the class index: exact and prefix matches,
//! wildcard forms, and the set of imports a piece of source code needs.

pub mod tokens;

use std::collections::HashSet;

use tracing::trace;

use crate::cli::Language;
use crate::index::ClassIndex;
use tokens::class_tokens;

/// The package-level wildcard form of a qualified path: `java.io.File`
/// becomes `java.io.*`, a path with no package becomes `*`.
pub fn wildcard_form(qualified: &str) -> String {
    match qualified.rsplit_once('.') {
        Some((package, _)) => format!("{package}.*"),
        None => "*".to_string(),
    }
}

/// Answers class-name lookups against a built [`ClassIndex`]. All
/// operations are read-only; the resolver owns the index for its
/// lifetime.
pub struct Resolver {
    index: ClassIndex,
    language: Language,
}

impl Resolver {
    pub fn new(index: ClassIndex, language: Language) -> Self {
        Self { index, language }
    }

    pub fn index(&self) -> &ClassIndex {
        &self.index
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The full qualified path for an exact simple class name.
    pub fn exact_import_path(&self, name: &str) -> Option<&str> {
        self.index.get(name)
    }

    /// The package wildcard path for an exact simple class name,
    /// e.g. `File` -> `java.io.*`.
    pub fn exact_wildcard_path(&self, name: &str) -> Option<String> {
        self.index.get(name).map(wildcard_form)
    }

    /// Among all simple names starting with `prefix`, the shortest one
    /// together with its wildcard path. Ties on name length fall to the
    /// shorter wildcard path; a remaining tie keeps whichever candidate
    /// was seen first (the index is unordered).
    pub fn prefix_best_match(&self, prefix: &str) -> Option<(String, String)> {
        let mut best: Option<(&str, String)> = None;
        for (name, path) in self.index.iter() {
            if !name.starts_with(prefix) {
                continue;
            }
            let wildcard = wildcard_form(path);
            let better = match &best {
                None => true,
                Some((best_name, best_wildcard)) => {
                    name.len() < best_name.len()
                        || (name.len() == best_name.len() && wildcard.len() < best_wildcard.len())
                }
            };
            if better {
                best = Some((name, wildcard));
            }
        }
        best.map(|(name, wildcard)| (name.to_string(), wildcard))
    }

    /// Every simple name starting with `prefix`, paired with its wildcard
    /// path. Order is undefined.
    pub fn prefix_all_matches(&self, prefix: &str) -> Vec<(String, String)> {
        self.index
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, path)| (name.to_string(), wildcard_form(path)))
            .collect()
    }

    /// The qualified paths the given source code needs imports for:
    /// every distinct class-looking token resolved exactly, minus classes
    /// under the language's implicitly imported packages, deduplicated by
    /// path, in first-encountered order.
    pub fn find_used_imports(&self, source: &str) -> Vec<String> {
        let mut seen_tokens = HashSet::new();
        let mut found = Vec::new();
        for token in class_tokens(source) {
            if !seen_tokens.insert(token) {
                continue;
            }
            let Some(path) = self.exact_import_path(token) else {
                trace!("no index entry for {token}");
                continue;
            };
            if self
                .language
                .implicit_roots()
                .iter()
                .any(|root| path.starts_with(root))
            {
                continue;
            }
            if !found.iter().any(|existing| existing == path) {
                found.push(path.to_string());
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn java_resolver() -> Resolver {
        let index = ClassIndex::from_entries([
            "java.io.File",
            "java.io.FileInputStream",
            "java.io.FileNotFoundException",
            "java.nio.file.FileStore",
            "java.util.Scanner",
            "java.lang.String",
        ]);
        Resolver::new(index, Language::Java)
    }

    #[test]
    fn test_exact_import_path() {
        let resolver = java_resolver();
        assert_eq!(resolver.exact_import_path("File"), Some("java.io.File"));
        assert_eq!(resolver.exact_import_path("Nope"), None);
    }

    #[test]
    fn test_exact_wildcard_path() {
        let resolver = java_resolver();
        assert_eq!(
            resolver.exact_wildcard_path("Scanner").as_deref(),
            Some("java.util.*")
        );
        assert_eq!(resolver.exact_wildcard_path("Nope"), None);
    }

    #[test]
    fn test_prefix_best_match_picks_shortest_name() {
        let resolver = java_resolver();
        let (name, wildcard) = resolver.prefix_best_match("FileInputS").unwrap();
        assert_eq!(name, "FileInputStream");
        assert_eq!(wildcard, "java.io.*");

        // "File" matches several entries; the shortest name wins.
        let (name, wildcard) = resolver.prefix_best_match("File").unwrap();
        assert_eq!(name, "File");
        assert_eq!(wildcard, "java.io.*");
    }

    #[test]
    fn test_prefix_best_match_miss() {
        let resolver = java_resolver();
        assert_eq!(resolver.prefix_best_match("Zzz"), None);
    }

    #[test]
    fn test_prefix_name_tie_breaks_on_wildcard_length() {
        let index = ClassIndex::from_entries([
            "org.example.deeply.nested.Wide",
            "org.example.Wise",
        ]);
        let resolver = Resolver::new(index, Language::Java);
        let (name, wildcard) = resolver.prefix_best_match("Wi").unwrap();
        assert_eq!(name, "Wise");
        assert_eq!(wildcard, "org.example.*");
    }

    #[test]
    fn test_prefix_all_matches() {
        let resolver = java_resolver();
        let mut all = resolver.prefix_all_matches("File");
        all.sort();
        assert_eq!(
            all,
            vec![
                ("File".to_string(), "java.io.*".to_string()),
                ("FileInputStream".to_string(), "java.io.*".to_string()),
                ("FileNotFoundException".to_string(), "java.io.*".to_string()),
                ("FileStore".to_string(), "java.nio.file.*".to_string()),
            ]
        );
    }

    #[test]
    fn test_find_used_imports_excludes_java_lang() {
        let resolver = java_resolver();
        let source = r#"
            File f = new File("x");
            String s = f.toString();
            Scanner in = new Scanner(f);
        "#;
        assert_eq!(
            resolver.find_used_imports(source),
            vec!["java.io.File", "java.util.Scanner"]
        );
    }

    #[test]
    fn test_find_used_imports_dedupes_and_keeps_first_seen_order() {
        let resolver = java_resolver();
        let source = "Scanner a; File b; Scanner c; File d;";
        assert_eq!(
            resolver.find_used_imports(source),
            vec!["java.util.Scanner", "java.io.File"]
        );
    }

    #[test]
    fn test_kotlin_mode_excludes_kotlin_root() {
        let index = ClassIndex::from_entries(["kotlin.text.Regex", "java.util.Scanner"]);
        let resolver = Resolver::new(index, Language::Kotlin);
        assert_eq!(
            resolver.find_used_imports("val r = Regex(\"x\"); val s = Scanner(f)"),
            vec!["java.util.Scanner"]
        );
    }

    #[test]
    fn test_wildcard_form_without_package() {
        assert_eq!(wildcard_form("Rootless"), "*");
    }
}
