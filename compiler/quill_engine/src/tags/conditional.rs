//! `{% if cond %}...{% elsif cond %}...{% else %}...{% endif %}`
//!
//! A condition is `value [op value]`, chained with `and` / `or`. Chains
//! group to the right: `a or b and c` is `a or (b and c)`.

use std::cmp::Ordering;

use futures::future::{FutureExt, LocalBoxFuture};
use quill_eval::{
    evaluate_token, render_templates, to_value, Context, Emitter, EvalResult, Template, TemplateRef,
};
use quill_ir::{Span, Value, ValueToken};
use quill_lexer::{TagToken, Tokenizer};

use crate::error::ParseError;
use crate::parser::{expect_no_args, illegal_tag, not_closed, ParseEvent, ParseStream};

#[derive(Debug)]
enum Condition {
    Test {
        left: ValueToken,
        comparison: Option<(&'static str, ValueToken)>,
    },
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

#[derive(Debug)]
struct Branch {
    condition: Condition,
    templates: Vec<TemplateRef>,
}

#[derive(Debug)]
pub struct IfTag {
    branches: Vec<Branch>,
    else_templates: Vec<TemplateRef>,
    span: Span,
}

pub fn parse(token: TagToken, stream: &mut ParseStream<'_>) -> Result<TemplateRef, ParseError> {
    let mut branches = vec![Branch {
        condition: parse_header(&token)?,
        templates: Vec::new(),
    }];
    let mut else_templates = Vec::new();
    let mut in_else = false;

    loop {
        match stream.next_event(&["elsif", "else", "endif"])? {
            ParseEvent::Template(template) if in_else => else_templates.push(template),
            ParseEvent::Template(template) => {
                if let Some(branch) = branches.last_mut() {
                    branch.templates.push(template);
                }
            }
            ParseEvent::Marker(marker) => match marker.name.as_str() {
                "elsif" if !in_else => branches.push(Branch {
                    condition: parse_header(&marker)?,
                    templates: Vec::new(),
                }),
                "else" if !in_else => {
                    expect_no_args(&marker)?;
                    in_else = true;
                }
                "endif" => {
                    expect_no_args(&marker)?;
                    break;
                }
                _ => {
                    return Err(ParseError::UnexpectedTag {
                        name: marker.name,
                        span: marker.span,
                    });
                }
            },
            ParseEvent::End => return Err(not_closed(&token)),
        }
    }

    Ok(Box::new(IfTag {
        branches,
        else_templates,
        span: token.span,
    }))
}

fn parse_header(token: &TagToken) -> Result<Condition, ParseError> {
    let mut tokenizer = token.tokenizer();
    let condition = parse_condition(&mut tokenizer, token)?;
    if !tokenizer.end() {
        return Err(illegal_tag(token));
    }
    Ok(condition)
}

fn parse_condition(tokenizer: &mut Tokenizer<'_>, token: &TagToken) -> Result<Condition, ParseError> {
    let left = tokenizer.read_value()?.ok_or_else(|| illegal_tag(token))?;
    let comparison = match tokenizer.read_operator() {
        Some(op) => {
            let right = tokenizer.read_value()?.ok_or_else(|| illegal_tag(token))?;
            Some((op, right))
        }
        None => None,
    };
    let test = Condition::Test { left, comparison };

    if tokenizer.consume_word("and") {
        let rest = parse_condition(tokenizer, token)?;
        Ok(Condition::And(Box::new(test), Box::new(rest)))
    } else if tokenizer.consume_word("or") {
        let rest = parse_condition(tokenizer, token)?;
        Ok(Condition::Or(Box::new(test), Box::new(rest)))
    } else {
        Ok(test)
    }
}

impl Condition {
    fn evaluate<'a>(&'a self, ctx: &'a Context) -> LocalBoxFuture<'a, EvalResult<bool>> {
        async move {
            match self {
                Condition::Test { left, comparison } => {
                    let left = to_value(evaluate_token(left, ctx).await?).await;
                    let Some((op, right)) = comparison else {
                        return Ok(left.is_truthy());
                    };
                    let right = to_value(evaluate_token(right, ctx).await?).await;
                    Ok(compare(&left, op, &right))
                }
                Condition::And(left, right) => {
                    Ok(left.evaluate(ctx).await? && right.evaluate(ctx).await?)
                }
                Condition::Or(left, right) => {
                    Ok(left.evaluate(ctx).await? || right.evaluate(ctx).await?)
                }
            }
        }
        .boxed_local()
    }

    fn collect_arguments<'a>(&'a self, out: &mut Vec<&'a ValueToken>) {
        match self {
            Condition::Test { left, comparison } => {
                out.push(left);
                if let Some((_, right)) = comparison {
                    out.push(right);
                }
            }
            Condition::And(left, right) | Condition::Or(left, right) => {
                left.collect_arguments(out);
                right.collect_arguments(out);
            }
        }
    }
}

/// Nullish values equal each other; everything else uses value equality.
fn loosely_equal(left: &Value, right: &Value) -> bool {
    (left.is_nullish() && right.is_nullish()) || left == right
}

fn ordering(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => left.as_f64()?.partial_cmp(&right.as_f64()?),
    }
}

fn compare(left: &Value, op: &str, right: &Value) -> bool {
    match op {
        "==" => loosely_equal(left, right),
        "!=" | "<>" => !loosely_equal(left, right),
        "<" => ordering(left, right) == Some(Ordering::Less),
        ">" => ordering(left, right) == Some(Ordering::Greater),
        "<=" => matches!(ordering(left, right), Some(Ordering::Less | Ordering::Equal)),
        ">=" => matches!(ordering(left, right), Some(Ordering::Greater | Ordering::Equal)),
        "contains" => match left {
            Value::Str(s) => s.contains(&*right.to_string()),
            Value::Array(items) => items.iter().any(|item| loosely_equal(item, right)),
            Value::Object(object) => object.contains(&right.to_key_string()),
            _ => false,
        },
        _ => false,
    }
}

impl IfTag {
    async fn run(&self, ctx: &mut Context, emitter: &mut Emitter) -> EvalResult<()> {
        for branch in &self.branches {
            if branch.condition.evaluate(ctx).await? {
                return render_templates(&branch.templates, ctx, emitter).await;
            }
        }
        render_templates(&self.else_templates, ctx, emitter).await
    }
}

impl Template for IfTag {
    fn render<'a>(
        &'a self,
        ctx: &'a mut Context,
        emitter: &'a mut Emitter,
    ) -> LocalBoxFuture<'a, EvalResult<()>> {
        self.run(ctx, emitter).boxed_local()
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<&dyn Template> {
        self.branches
            .iter()
            .flat_map(|branch| &branch.templates)
            .chain(&self.else_templates)
            .map(|template| &**template)
            .collect()
    }

    fn arguments(&self) -> Vec<&ValueToken> {
        let mut out = Vec::new();
        for branch in &self.branches {
            branch.condition.collect_arguments(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons() {
        assert!(compare(&Value::Int(2), "==", &Value::Float(2.0)));
        assert!(compare(&Value::Nil, "==", &Value::Undefined));
        assert!(compare(&Value::Int(1), "<>", &Value::Int(2)));
        assert!(compare(&Value::Int(1), "<", &Value::Float(1.5)));
        assert!(compare(&Value::string("b"), ">=", &Value::string("a")));
        assert!(!compare(&Value::string("1"), "<", &Value::Int(2)));
    }

    #[test]
    fn contains_on_strings_arrays_objects() {
        assert!(compare(&Value::string("hello"), "contains", &Value::string("ell")));
        let items = Value::array(vec![Value::Int(1), Value::Int(2)]);
        assert!(compare(&items, "contains", &Value::Int(2)));
        assert!(!compare(&items, "contains", &Value::Int(3)));
        let object = Value::object(quill_ir::Object::from_iter([("k", Value::Nil)]));
        assert!(compare(&object, "contains", &Value::string("k")));
        assert!(!compare(&Value::Int(12), "contains", &Value::Int(1)));
    }
}
