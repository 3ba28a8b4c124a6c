#![expect(clippy::unwrap_used, reason = "test code")]

use pretty_assertions::assert_eq;

use super::*;
use crate::Quill;

fn globals(source: &str) -> Vec<String> {
    global_variables(&Quill::default().parse(source).unwrap())
}

#[test]
fn outputs_report_roots() {
    assert_eq!(globals("{{ user.name }} {{ items[i] }}"), vec!["user", "items", "i"]);
}

#[test]
fn loop_bindings_are_local() {
    assert_eq!(
        globals("{% for p in products limit: max %}{{ p.title }}{{ forloop.index }}{{ tax }}{% endfor %}"),
        vec!["products", "max", "tax"]
    );
}

#[test]
fn continue_is_bound_in_loop_arguments() {
    assert_eq!(
        globals("{% for x in xs offset: continue %}{% endfor %}"),
        vec!["xs"]
    );
}

#[test]
fn loop_variable_is_free_again_after_the_loop() {
    assert_eq!(
        globals("{% for x in xs %}{{ x }}{% endfor %}{{ x }}"),
        vec!["xs", "x"]
    );
}

#[test]
fn assignments_bind_later_reads() {
    assert_eq!(
        globals("{{ a }}{% assign a = b %}{{ a }}{% if a == c %}{% endif %}"),
        vec!["a", "b", "c"]
    );
}

#[test]
fn duplicates_are_reported_once() {
    assert_eq!(globals("{{ a }}{{ a.b }}{% if a %}{{ a }}{% endif %}"), vec!["a"]);
}
