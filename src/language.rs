//! Extension to fence-language lookup

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;

/// File extension (lowercase, with the dot) to the alias a highlighting fence expects
pub static EXTENSION_LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (".c", "c"),
        (".cpp", "cpp"),
        (".cs", "csharp"),
        (".css", "css"),
        (".dart", "dart"),
        (".elixir", "elixir"),
        (".ex", "elixir"),
        (".exs", "elixir"),
        (".go", "go"),
        (".h", "c"),
        (".htm", "html"),
        (".html", "html"),
        (".java", "java"),
        (".js", "javascript"),
        (".json", "json"),
        (".kt", "kotlin"),
        (".less", "less"),
        (".markdown", "markdown"),
        (".md", "markdown"),
        (".php", "php"),
        (".pl", "perl"),
        (".py", "python"),
        (".r", "r"),
        (".rb", "ruby"),
        (".rs", "rust"),
        (".scss", "scss"),
        (".sh", "bash"),
        (".sql", "sql"),
        (".swift", "swift"),
        (".ts", "typescript"),
        (".tsx", "typescriptreact"),
        (".xml", "xml"),
        (".yaml", "yaml"),
        (".yml", "yaml"),
    ])
});

/// Language label for a path, if its extension is known
///
/// Only the final extension counts, so `archive.tar.gz` looks up `.gz` and a
/// dotfile such as `.bashrc` has no extension at all.
pub fn language_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    let key = format!(".{}", ext.to_lowercase());
    EXTENSION_LANGUAGES.get(key.as_str()).copied()
}
