use oliver_core::{OliverError, Value};

pub use oliver_eval::{eval_source, Machine};
pub use oliver_reader::read;

/// Render the compiled token stream, one token per line: the `.oll` debug
/// dump format written next to an input file. Never re-read.
pub fn dump_tokens(source: &str) -> Result<String, OliverError> {
    let tokens = oliver_reader::tokenize(source)?;
    let mut out = String::new();
    for token in tokens {
        out.push_str(&token.token.to_string());
        out.push('\n');
    }
    Ok(out)
}

/// The parsed tree as JSON, for `ast --json`.
pub fn ast_json(value: &Value) -> serde_json::Value {
    use serde_json::json;

    match value {
        Value::Nothing => json!({ "type": "nothing" }),
        Value::Boolean(b) => json!({ "type": "boolean", "value": b.to_string() }),
        Value::Number(n) => json!({ "type": "number", "value": n.to_string() }),
        Value::String(s) => json!({ "type": "string", "value": s.as_ref() }),
        Value::Symbol(s) => json!({ "type": "symbol", "value": oliver_core::resolve(*s) }),
        Value::OpCall(op) => json!({ "type": "op_call", "value": op.token() }),
        Value::Error(kind) => json!({ "type": "error", "value": kind.as_ref() }),
        Value::Expression(e) => json!({
            "type": "expression",
            "children": e.iter().map(ast_json).collect::<Vec<_>>(),
        }),
        Value::Scope(e) => json!({
            "type": "scope",
            "children": e.iter().map(ast_json).collect::<Vec<_>>(),
        }),
        Value::List(items) => json!({
            "type": "list",
            "children": items.iter().map(ast_json).collect::<Vec<_>>(),
        }),
        Value::Lambda(lam) => json!({
            "type": "lambda",
            "args": lam.args.iter().map(ast_json).collect::<Vec<_>>(),
            "body": ast_json(&lam.body),
        }),
    }
}

/// Indented tree form of the parsed expression, for `ast` without `--json`.
pub fn print_ast(value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Expression(e) => {
            println!("{pad}Expression");
            for item in e.iter() {
                print_ast(item, indent + 1);
            }
        }
        Value::Scope(e) => {
            println!("{pad}Scope");
            for item in e.iter() {
                print_ast(item, indent + 1);
            }
        }
        Value::List(items) => {
            println!("{pad}List");
            for item in items.iter() {
                print_ast(item, indent + 1);
            }
        }
        Value::Lambda(lam) => {
            println!("{pad}Lambda");
            for item in lam.args.iter() {
                print_ast(item, indent + 1);
            }
            print_ast(&lam.body, indent + 1);
        }
        Value::OpCall(op) => println!("{pad}OpCall {}", op.token()),
        Value::Symbol(s) => println!("{pad}Symbol {}", oliver_core::resolve(*s)),
        Value::String(s) => println!("{pad}String {s:?}"),
        Value::Number(n) => println!("{pad}Number {n}"),
        Value::Boolean(b) => println!("{pad}Boolean {b}"),
        Value::Error(kind) => println!("{pad}Error {kind}"),
        Value::Nothing => println!("{pad}Nothing"),
    }
}
