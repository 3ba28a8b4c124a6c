//! Static analysis over parsed templates.

use indexmap::IndexSet;
use quill_eval::{Template, TemplateRef};
use rustc_hash::FxHashSet;

#[derive(Default)]
struct Walker<'t> {
    /// Names bound by enclosing blocks, innermost last.
    scopes: Vec<&'t str>,
    /// Names declared into the operating scope by earlier nodes.
    declared: FxHashSet<&'t str>,
    found: IndexSet<String>,
}

impl<'t> Walker<'t> {
    fn visit(&mut self, template: &'t dyn Template) {
        let mark = self.scopes.len();
        self.scopes.extend(template.argument_scope());
        for argument in template.arguments() {
            for root in argument.expr.variable_roots() {
                if !self.is_bound(root) {
                    self.found.insert(root.to_owned());
                }
            }
        }
        self.scopes.truncate(mark);

        self.scopes.extend(template.block_scope());
        for child in template.children() {
            self.visit(child);
        }
        self.scopes.truncate(mark);

        self.declared.extend(template.declarations());
    }

    fn is_bound(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| *scope == name) || self.declared.contains(name)
    }
}

/// Root names of every variable the templates read from their data, in
/// first-use order.
///
/// Names bound by an enclosing block (a loop variable, `forloop`) or
/// assigned earlier in the template are not reported.
pub fn global_variables(templates: &[TemplateRef]) -> Vec<String> {
    let mut walker = Walker::default();
    for template in templates {
        walker.visit(&**template);
    }
    walker.found.into_iter().collect()
}

#[cfg(test)]
mod tests;
