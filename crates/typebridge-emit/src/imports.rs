//! Import computation.
//!
//! Generated classes refer to each other as `Name.Name`: the module namespace
//! `Name` imported from `./Name.generated.js`, then the class inside it. The
//! set of modules a file needs is recovered by scanning its rendered body for
//! such self-qualified tokens, outside string literals.

use std::collections::BTreeSet;
use typebridge_core::syntax::qualified_refs;

/// Modules referenced by `body`, sorted and deduplicated. Names in `exclude`
/// (the schema namespace, helper namespaces, the file's own type) are never
/// imported as generated modules.
pub fn referenced_modules(body: &str, exclude: &[&str]) -> Vec<String> {
    let modules: BTreeSet<&str> = qualified_refs(body)
        .into_iter()
        .map(|(_, name)| name)
        .filter(|name| !exclude.contains(name))
        .collect();

    modules.into_iter().map(str::to_string).collect()
}

/// Rewrite `name.name` references to plain `name`, for a class that refers to
/// itself inside its own module.
pub fn unqualify_self(body: &str, name: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut last = 0;

    for (range, found) in qualified_refs(body) {
        if found == name {
            out.push_str(&body[last..range.start]);
            out.push_str(name);
            last = range.end;
        }
    }

    out.push_str(&body[last..]);
    out
}

/// `import * as Name from "./Name.generated.js";`
pub fn module_import(name: &str, module_extension: &str) -> String {
    format!("import * as {name} from \"./{name}.generated.{module_extension}\";")
}

/// Extension used in import specifiers for files written with `extension`.
pub fn module_extension(extension: &str) -> &str {
    match extension {
        "ts" | "tsx" => "js",
        "mts" => "mjs",
        "cts" => "cjs",
        other => other,
    }
}
