//! Run manifest rendering
//!
//! A plain-text description of the configured model, written next to the
//! output file so a fact file can always be traced back to the selections
//! that produced it.

use std::collections::BTreeSet;
use std::fmt::Write;

use filmfact_domain::EntityKind;
use filmfact_model::Model;

/// Render the manifest for a run rooted at `root`.
///
/// Each entity kind reachable over enabled links gets a boxed section with
/// its selected sub-kinds, attributes (with constraint status), and link
/// kinds, indented one level per traversal depth.
pub fn render_manifest(model: &Model, root: EntityKind) -> String {
    let mut out = String::new();
    let mut path = BTreeSet::new();
    path.insert(root);
    render_kind(model, root, 0, &mut path, &mut out);
    out
}

fn render_kind(
    model: &Model,
    kind: EntityKind,
    level: usize,
    path: &mut BTreeSet<EntityKind>,
    out: &mut String,
) {
    let pad = "  ".repeat(level);
    let catalog = model.catalog(kind);
    let name = kind.name();

    let _ = writeln!(out, "{pad}.-{}-.", "-".repeat(name.len()));
    let _ = writeln!(out, "{pad}| {name} |");
    let _ = writeln!(out, "{pad}`-{}-^", "-".repeat(name.len()));

    let _ = writeln!(out, "{pad}Sub-kinds:");
    for sk in catalog.sub_kinds.iter().filter(|sk| sk.enabled) {
        let _ = writeln!(out, "{pad} - {}", sk.name);
    }

    let _ = writeln!(out, "{pad}Attributes:");
    for attr in &catalog.attributes {
        let checked = if attr.enabled { ": enabled" } else { "" };
        let _ = writeln!(out, "{pad} - {}{checked}", attr.predicate);
        for slot in &attr.constraints {
            let status = if slot.enabled { "enabled" } else { "disabled" };
            let _ = writeln!(out, "{pad}    *{} ({status})", slot.constraint);
        }
    }

    for table in model.outbound_links(kind) {
        let _ = writeln!(out, "{pad}Links to {}:", table.target.name());
        for link in table.kinds.iter().filter(|k| k.enabled) {
            let _ = writeln!(out, "{pad} - {}", link.name);
        }
        let _ = writeln!(out, "{pad} \\");
        if path.insert(table.target) {
            render_kind(model, table.target, level + 1, path, out);
            path.remove(&table.target);
        } else {
            // kind already on the path, reference only
            let _ = writeln!(out, "{}({})", "  ".repeat(level + 1), table.target.name());
        }
    }
}
