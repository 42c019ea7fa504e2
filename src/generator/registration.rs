//! Idempotent patches of shared project files.
//!
//! The service provider is parsed into a [`ProviderFile`]: the namespace line,
//! the set of imported classes and the set of container bindings inside
//! `register()`. "Already present" is a set-membership check, and applying
//! the same patch twice leaves the text byte-identical.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex must compile")
}

static NAMESPACE_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"^\s*namespace\s+[^;]+;"));
static USE_RE: LazyLock<Regex> = LazyLock::new(|| regex(r"^\s*use\s+\\?([A-Za-z0-9_\\]+)\s*;"));
static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^\s*(?:(?:abstract|final)\s+)?class\s+\w+"));
static REGISTER_RE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^(\s*)public\s+function\s+register\s*\(\s*\)"));
static BIND_RE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"->(?:bind|singleton)\(\s*\\?([A-Za-z0-9_\\]+)::class\s*,\s*\\?([A-Za-z0-9_\\]+)::class\s*\)")
});

/// Marker proving the route autoload block is present
pub const ROUTE_AUTOLOAD_MARKER: &str = "foreach (glob(app_path('Routes/*.php'))";

/// A container binding `interface => implementation`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Binding {
    pub interface: String,
    pub implementation: String,
}

impl Binding {
    pub fn new(interface: impl Into<String>, implementation: impl Into<String>) -> Self {
        Self {
            interface: short_name(&interface.into()).to_string(),
            implementation: short_name(&implementation.into()).to_string(),
        }
    }

    pub fn statement(&self) -> String {
        format!(
            "$this->app->bind({}::class, {}::class);",
            self.interface, self.implementation
        )
    }
}

fn short_name(class: &str) -> &str {
    class.rsplit('\\').next().unwrap_or(class)
}

fn normalize_fqcn(class: &str) -> String {
    class.trim().trim_start_matches('\\').to_string()
}

/// Structured view of a service-provider source file
#[derive(Debug, Clone)]
pub struct ProviderFile {
    lines: Vec<String>,
    trailing_newline: bool,
    namespace_line: usize,
    imports: BTreeSet<String>,
    /// Index of the line holding the `{` that opens `register()`
    register_open: usize,
    bindings: BTreeSet<Binding>,
}

impl ProviderFile {
    /// Parse provider source.
    ///
    /// # Errors
    ///
    /// Returns a message when the namespace line or `register()` body is missing.
    pub fn parse(source: &str) -> Result<Self, String> {
        let lines: Vec<String> = source.lines().map(str::to_string).collect();
        let trailing_newline = source.ends_with('\n');

        let namespace_line = lines
            .iter()
            .position(|l| NAMESPACE_RE.is_match(l))
            .ok_or_else(|| "no namespace declaration".to_string())?;

        let class_line = lines
            .iter()
            .position(|l| CLASS_RE.is_match(l))
            .unwrap_or(lines.len());
        let imports = lines[..class_line]
            .iter()
            .filter_map(|l| USE_RE.captures(l))
            .filter_map(|c| c.get(1).map(|m| normalize_fqcn(m.as_str())))
            .collect();

        let register_line = lines
            .iter()
            .position(|l| REGISTER_RE.is_match(l))
            .ok_or_else(|| "no register() method".to_string())?;
        let register_open = lines[register_line..]
            .iter()
            .position(|l| l.contains('{'))
            .map(|offset| register_line + offset)
            .ok_or_else(|| "register() has no body".to_string())?;
        let register_close = body_end(&lines, register_open);

        let bindings = lines[register_open..=register_close]
            .iter()
            .flat_map(|l| BIND_RE.captures_iter(l))
            .filter_map(|c| Some(Binding::new(c.get(1)?.as_str(), c.get(2)?.as_str())))
            .collect();

        Ok(Self {
            lines,
            trailing_newline,
            namespace_line,
            imports,
            register_open,
            bindings,
        })
    }

    pub fn has_import(&self, fqcn: &str) -> bool {
        self.imports.contains(&normalize_fqcn(fqcn))
    }

    pub fn has_binding(&self, binding: &Binding) -> bool {
        self.bindings.contains(binding)
    }

    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    pub fn bindings(&self) -> &BTreeSet<Binding> {
        &self.bindings
    }

    /// Add missing imports and bindings; returns whether anything changed.
    ///
    /// Imports go right after the namespace line (after its blank separator),
    /// bindings become the first statements of `register()`.
    pub fn apply(&mut self, imports: &[String], bindings: &[Binding]) -> bool {
        let missing_bindings: Vec<Binding> = dedup(
            bindings.iter().filter(|b| !self.has_binding(b)).cloned(),
        );
        let missing_imports: Vec<String> = dedup(
            imports
                .iter()
                .map(|i| normalize_fqcn(i))
                .filter(|i| !self.imports.contains(i)),
        );
        if missing_imports.is_empty() && missing_bindings.is_empty() {
            return false;
        }

        // Bindings first: they sit below the imports, so inserting them does
        // not shift the namespace anchor.
        if !missing_bindings.is_empty() {
            let indent = format!("{}    ", leading_ws(&self.lines[self.register_open_decl()]));
            let at = self.register_open + 1;
            for (offset, binding) in missing_bindings.iter().enumerate() {
                self.lines
                    .insert(at + offset, format!("{indent}{}", binding.statement()));
                self.bindings.insert(binding.clone());
            }
        }

        if !missing_imports.is_empty() {
            let mut at = self.namespace_line + 1;
            let mut block: Vec<String> = Vec::new();
            if self.lines.get(at).is_some_and(|l| l.trim().is_empty()) {
                at += 1;
            } else {
                block.push(String::new());
            }
            let needs_separator = self
                .lines
                .get(at)
                .is_some_and(|l| !l.trim().is_empty() && !USE_RE.is_match(l));
            for import in &missing_imports {
                block.push(format!("use {import};"));
                self.imports.insert(import.clone());
            }
            if needs_separator {
                block.push(String::new());
            }
            let inserted = block.len();
            self.lines.splice(at..at, block);
            self.register_open += inserted;
        }
        true
    }

    /// Line declaring `register()`, for indentation
    fn register_open_decl(&self) -> usize {
        self.lines[..=self.register_open]
            .iter()
            .rposition(|l| REGISTER_RE.is_match(l))
            .unwrap_or(self.register_open)
    }

    /// Deterministic serialization
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}

fn dedup<T: Ord + Clone>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = BTreeSet::new();
    items.filter(|i| seen.insert(i.clone())).collect()
}

fn leading_ws(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Index of the line closing the brace opened on `open`
fn body_end(lines: &[String], open: usize) -> usize {
    let mut depth = 0i32;
    for (idx, line) in lines.iter().enumerate().skip(open) {
        for c in line.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
        }
        if depth <= 0 && (idx > open || line.contains('}')) {
            return idx;
        }
    }
    lines.len().saturating_sub(1)
}

/// Patch provider `source`; `Ok(None)` when nothing is missing.
pub fn patch_provider(source: &str, imports: &[String], bindings: &[Binding]) -> Result<Option<String>, String> {
    let mut provider = ProviderFile::parse(source)?;
    Ok(provider.apply(imports, bindings).then(|| provider.render()))
}

/// The block appended to the API route file
pub fn route_autoload_block() -> String {
    format!(
        "\n// Load every CRUD route file in app/Routes\n{ROUTE_AUTOLOAD_MARKER} as $routeFile) {{\n    require $routeFile;\n}}\n"
    )
}

/// Append the route autoload block; `None` when already present.
///
/// A missing route file is started from a minimal header.
pub fn ensure_route_autoload(existing: Option<&str>) -> Option<String> {
    match existing {
        Some(contents) if contents.contains(ROUTE_AUTOLOAD_MARKER) => None,
        Some(contents) => {
            let mut out = contents.to_string();
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&route_autoload_block());
            Some(out)
        }
        None => Some(format!(
            "<?php\n\nuse Illuminate\\Support\\Facades\\Route;\n{}",
            route_autoload_block()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PROVIDER: &str = "<?php

namespace App\\Providers;

use Illuminate\\Support\\ServiceProvider;

class AppServiceProvider extends ServiceProvider
{
    /**
     * Register any application services.
     */
    public function register(): void
    {
        //
    }

    public function boot(): void
    {
        //
    }
}
";

    fn product_patch() -> (Vec<String>, Vec<Binding>) {
        (
            vec![
                "App\\Repositories\\Product\\ProductRepositoryInterface".to_string(),
                "App\\Repositories\\Product\\ProductRepository".to_string(),
            ],
            vec![Binding::new("ProductRepositoryInterface", "ProductRepository")],
        )
    }

    #[test]
    fn test_patch_inserts_imports_and_binding() {
        let (imports, bindings) = product_patch();
        let patched = patch_provider(PROVIDER, &imports, &bindings).unwrap().unwrap();
        let expected = "<?php

namespace App\\Providers;

use App\\Repositories\\Product\\ProductRepositoryInterface;
use App\\Repositories\\Product\\ProductRepository;
use Illuminate\\Support\\ServiceProvider;

class AppServiceProvider extends ServiceProvider
{
    /**
     * Register any application services.
     */
    public function register(): void
    {
        $this->app->bind(ProductRepositoryInterface::class, ProductRepository::class);
        //
    }

    public function boot(): void
    {
        //
    }
}
";
        assert_eq!(patched, expected);
    }

    #[test]
    fn test_patch_is_idempotent() {
        let (imports, bindings) = product_patch();
        let once = patch_provider(PROVIDER, &imports, &bindings).unwrap().unwrap();
        assert_eq!(patch_provider(&once, &imports, &bindings).unwrap(), None);
    }

    #[test]
    fn test_existing_fqcn_binding_counts_as_present() {
        let source = PROVIDER.replace(
            "        //\n    }\n\n    public function boot",
            "        $this->app->singleton(\\App\\Repositories\\Product\\ProductRepositoryInterface::class, \\App\\Repositories\\Product\\ProductRepository::class);\n    }\n\n    public function boot",
        );
        let provider = ProviderFile::parse(&source).unwrap();
        assert!(provider.has_binding(&Binding::new("ProductRepositoryInterface", "ProductRepository")));
    }

    #[test]
    fn test_bindings_outside_register_are_ignored() {
        let source = PROVIDER.replace(
            "    public function boot(): void\n    {\n        //",
            "    public function boot(): void\n    {\n        $this->app->bind(AInterface::class, A::class);",
        );
        let provider = ProviderFile::parse(&source).unwrap();
        assert!(provider.bindings().is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_register() {
        let err = ProviderFile::parse("<?php\n\nnamespace App;\n\nclass X {}\n").unwrap_err();
        assert!(err.contains("register"));
    }

    #[test]
    fn test_route_autoload_appended_once() {
        let original = "<?php\n\nuse Illuminate\\Support\\Facades\\Route;\n";
        let patched = ensure_route_autoload(Some(original)).unwrap();
        assert!(patched.starts_with(original));
        assert!(patched.contains(ROUTE_AUTOLOAD_MARKER));
        assert_eq!(ensure_route_autoload(Some(&patched)), None);
    }

    #[test]
    fn test_route_autoload_creates_missing_file() {
        let created = ensure_route_autoload(None).unwrap();
        assert!(created.starts_with("<?php"));
        assert_eq!(created.matches(ROUTE_AUTOLOAD_MARKER).count(), 1);
    }
}
