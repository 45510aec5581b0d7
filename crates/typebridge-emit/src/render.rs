//! Class and index file rendering

use crate::imports::{module_import, referenced_modules, unqualify_self};
use typebridge_core::syntax::{SCHEMA_NAMESPACE, render_field, string_literal};
use typebridge_core::{NamespaceImport, TypeNode};

/// Import of the schema library itself, first line of every class file.
pub const SCHEMA_IMPORT: &str = "import * as Schema from \"effect/Schema\";";

/// Render the complete module for one node.
///
/// `documentation` is the resolved link, or `None` to omit the metadata
/// line. `module_extension` is the extension used in import specifiers.
pub fn render_class(
    node: &TypeNode,
    documentation: Option<&str>,
    namespaces: &[NamespaceImport],
    module_extension: &str,
) -> String {
    let name = &node.target_name;
    let body = unqualify_self(&class_body(node, documentation), name);

    let mut code = String::new();
    code.push_str(SCHEMA_IMPORT);
    code.push('\n');

    for namespace in namespaces {
        if body.contains(&format!("{}.", namespace.name)) {
            code.push_str(&format!(
                "import * as {} from {};\n",
                namespace.name,
                string_literal(&namespace.from)
            ));
        }
    }

    let mut exclude: Vec<&str> = vec![SCHEMA_NAMESPACE, name.as_str()];
    exclude.extend(namespaces.iter().map(|namespace| namespace.name.as_str()));
    for module in referenced_modules(&body, &exclude) {
        code.push_str(&module_import(&module, module_extension));
        code.push('\n');
    }

    code.push('\n');
    code.push_str(&body);
    code
}

fn class_body(node: &TypeNode, documentation: Option<&str>) -> String {
    let name = &node.target_name;
    let mut code = String::new();

    code.push_str(&format!(
        "export class {name} extends Schema.Class<{name}>({})(\n",
        string_literal(name)
    ));

    code.push_str("    {\n");
    for property in node.properties() {
        code.push_str(&format!("        {},", render_field(property)));
        if let Some(location) = property.location {
            code.push_str(&format!(" // {location}"));
        }
        code.push('\n');
    }
    code.push_str("    },\n");

    code.push_str("    {\n");
    code.push_str(&format!("        identifier: {},\n", string_literal(name)));
    code.push_str(&format!(
        "        title: {},\n",
        string_literal(&node.source_title)
    ));
    if let Some(url) = documentation {
        code.push_str(&format!("        documentation: {},\n", string_literal(url)));
    }
    code.push_str("    }\n");
    code.push_str(") {}\n");

    code
}

/// Index module re-exporting every generated module, sorted by name.
pub fn render_index<S: AsRef<str>>(names: &[S], module_extension: &str) -> String {
    let mut names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    names.sort_unstable();
    names.dedup();

    names
        .into_iter()
        .map(|name| format!("export * from \"./{name}.generated.{module_extension}\";\n"))
        .collect()
}
