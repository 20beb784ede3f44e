use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;
use lasso::{Rodeo, Spur};

use crate::boolean::Boolean;
use crate::expr::Expr;
use crate::number::Number;
use crate::opcode::OpCode;

// ── String interning ──────────────────────────────────────────────

thread_local! {
    static INTERNER: RefCell<Rodeo> = RefCell::new(Rodeo::default());
}

/// Intern a string, returning a Spur key.
pub fn intern(s: &str) -> Spur {
    INTERNER.with(|r| r.borrow_mut().get_or_intern(s))
}

/// Resolve a Spur key back to a String.
pub fn resolve(spur: Spur) -> String {
    INTERNER.with(|r| r.borrow().resolve(&spur).to_string())
}

/// Resolve a Spur and call f with the &str, avoiding allocation.
pub fn with_resolved<F, R>(spur: Spur, f: F) -> R
where
    F: FnOnce(&str) -> R,
{
    INTERNER.with(|r| {
        let interner = r.borrow();
        f(interner.resolve(&spur))
    })
}

/// Compare two Spurs by their resolved string content (lexicographic).
pub fn compare_spurs(a: Spur, b: Spur) -> std::cmp::Ordering {
    if a == b {
        return std::cmp::Ordering::Equal;
    }
    INTERNER.with(|r| {
        let interner = r.borrow();
        interner.resolve(&a).cmp(interner.resolve(&b))
    })
}

/// A lexical frame: interned name → value.
pub type ScopeMap = HashMap<Spur, Value>;

// ── Lambda ────────────────────────────────────────────────────────

/// A callable value: formal parameters, a body, and the variables captured
/// at definition time. `lead` answers the formals and `last` the body, so a
/// lambda walks like a two-element sequence where the evaluator needs it to.
#[derive(Debug, Clone)]
pub struct Lambda {
    pub args: Expr,
    pub body: Value,
    pub variables: ScopeMap,
}

impl Lambda {
    pub fn new(args: Expr, body: Value) -> Lambda {
        Lambda {
            args,
            body,
            variables: ScopeMap::new(),
        }
    }

    /// Snapshot an enclosing frame into the capture map. The entry named by
    /// the frame's own `self` binding is skipped, so a lambda never captures
    /// the enclosing lambda's self-reference cycle.
    pub fn bind_scope(&mut self, scope: &ScopeMap) {
        let own_name = scope
            .get(&intern("self"))
            .and_then(|v| match v {
                Value::Symbol(s) => Some(*s),
                _ => None,
            });

        for (key, val) in scope {
            if Some(*key) != own_name {
                self.variables.insert(*key, val.clone());
            }
        }
    }

    pub fn bind_variable(&mut self, key: Spur, val: Value) {
        self.variables.insert(key, val);
    }

    pub fn is_true(&self) -> bool {
        !self.args.is_empty() || self.body.is_truthy()
    }
}

// ── Value ─────────────────────────────────────────────────────────

/// The universal dynamically-typed cell. A closed set of variants; every
/// semantic operation is a single match over it, and heap-backed variants
/// share structure through `Rc`, so cloning is always cheap.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Nothing,
    Boolean(Boolean),
    Number(Number),
    String(Rc<str>),
    Symbol(Spur),
    OpCall(OpCode),
    Error(Rc<str>),
    Expression(Expr),
    Scope(Expr),
    List(Rc<Vec<Value>>),
    Lambda(Rc<Lambda>),
}

impl Value {
    // -- Constructors --

    pub fn boolean(truth: bool) -> Value {
        Value::Boolean(Boolean::new(truth))
    }

    pub fn number(n: f64) -> Value {
        Value::Number(Number::real(n))
    }

    pub fn string(s: &str) -> Value {
        Value::String(Rc::from(s))
    }

    pub fn symbol(name: &str) -> Value {
        Value::Symbol(intern(name))
    }

    pub fn error(kind: &str) -> Value {
        Value::Error(Rc::from(kind))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(items))
    }

    pub fn op_call(code: OpCode) -> Value {
        Value::OpCall(code)
    }

    // -- Classification --

    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Nothing => "nothing",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::OpCall(_) => "op_call",
            Value::Error(_) => "error",
            Value::Expression(_) => "expression",
            Value::Scope(_) => "scope",
            Value::List(_) => "list",
            Value::Lambda(_) => "lambda",
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nothing => false,
            Value::Boolean(b) => b.is_true(),
            Value::Number(n) => n.is_true(),
            Value::String(s) => !s.is_empty(),
            Value::Symbol(_) => true,
            Value::OpCall(op) => *op != OpCode::Nothing,
            Value::Error(kind) => !kind.is_empty(),
            Value::Expression(e) | Value::Scope(e) => !e.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Lambda(lam) => lam.is_true(),
        }
    }

    /// The opcode behind an op_call; [`OpCode::Nothing`] for anything else.
    pub fn op_code(&self) -> OpCode {
        match self {
            Value::OpCall(op) => *op,
            _ => OpCode::Nothing,
        }
    }

    pub fn is_iterable(&self) -> bool {
        matches!(
            self,
            Value::Expression(_) | Value::Scope(_) | Value::List(_) | Value::String(_)
        )
    }

    // -- Comparison --

    /// Total-ish order: 0 for structural equality, ±1 where an order
    /// exists, NaN where none does (including every cross-variant pair).
    pub fn compare(&self, other: &Value) -> f64 {
        match (self, other) {
            (Value::Nothing, Value::Nothing) => 0.0,
            (Value::Boolean(a), Value::Boolean(b)) => a.compare(b),
            (Value::Number(a), Value::Number(b)) => a.compare(b),
            (Value::String(a), Value::String(b)) => ordering_to_real(a.cmp(b)),
            (Value::Symbol(a), Value::Symbol(b)) => ordering_to_real(compare_spurs(*a, *b)),
            (Value::OpCall(a), Value::OpCall(b)) => ordering_to_real(a.cmp(b)),
            (Value::Error(a), Value::Error(b)) => ordering_to_real(a.cmp(b)),
            (Value::Expression(a), Value::Expression(b)) | (Value::Scope(a), Value::Scope(b)) => {
                sequence_equality(a.iter(), b.iter(), a.len() == b.len())
            }
            (Value::List(a), Value::List(b)) => {
                sequence_equality(a.iter(), b.iter(), a.len() == b.len())
            }
            (Value::Lambda(a), Value::Lambda(b)) => {
                let args_equal = Value::Expression(a.args.clone())
                    .compare(&Value::Expression(b.args.clone()))
                    == 0.0;
                if args_equal && a.body.compare(&b.body) == 0.0 {
                    0.0
                } else {
                    f64::NAN
                }
            }
            _ => f64::NAN,
        }
    }

    // -- Logic --

    pub fn l_and(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.l_and(b),
            _ => self.is_truthy() && other.is_truthy(),
        }
    }

    pub fn l_or(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.l_or(b),
            _ => self.is_truthy() || other.is_truthy(),
        }
    }

    pub fn l_xor(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.l_xor(b),
            _ => self.is_truthy() ^ other.is_truthy(),
        }
    }

    pub fn l_not(&self) -> bool {
        match self {
            Value::Number(n) => n.l_not(),
            _ => !self.is_truthy(),
        }
    }

    // -- Arithmetic --

    pub fn neg(&self) -> Value {
        match self {
            Value::Number(n) => Value::Number(n.neg()),
            Value::Boolean(b) => Value::boolean(!b.is_true()),
            _ => Value::Nothing,
        }
    }

    pub fn add(&self, other: &Value) -> Value {
        numeric_op(self, other, Number::add)
    }

    pub fn sub(&self, other: &Value) -> Value {
        numeric_op(self, other, Number::sub)
    }

    pub fn mul(&self, other: &Value) -> Value {
        numeric_op(self, other, Number::mul)
    }

    pub fn div(&self, other: &Value) -> Value {
        numeric_op(self, other, Number::div)
    }

    pub fn modulo(&self, other: &Value) -> Value {
        numeric_op(self, other, Number::modulo)
    }

    pub fn floor_div(&self, other: &Value) -> Value {
        numeric_op(self, other, Number::floor_div)
    }

    pub fn rem(&self, other: &Value) -> Value {
        numeric_op(self, other, Number::rem)
    }

    pub fn pow(&self, other: &Value) -> Value {
        numeric_op(self, other, Number::pow)
    }

    // -- Sequence --

    pub fn size(&self) -> usize {
        match self {
            Value::Expression(e) | Value::Scope(e) => e.len(),
            Value::List(items) => items.len(),
            Value::String(s) => s.chars().count(),
            Value::Lambda(lam) => lam.args.len(),
            _ => 0,
        }
    }

    pub fn lead(&self) -> Value {
        match self {
            Value::Expression(e) | Value::Scope(e) => e.lead(),
            Value::List(items) => items.first().cloned().unwrap_or(Value::Nothing),
            Value::String(s) => match s.chars().next() {
                Some(c) => Value::string(&c.to_string()),
                None => Value::Nothing,
            },
            Value::Lambda(lam) => {
                if lam.args.is_empty() {
                    Value::Nothing
                } else {
                    Value::Expression(lam.args.clone())
                }
            }
            _ => Value::Nothing,
        }
    }

    pub fn last(&self) -> Value {
        match self {
            Value::Expression(e) | Value::Scope(e) => e.last(),
            Value::List(items) => items.last().cloned().unwrap_or(Value::Nothing),
            Value::String(s) => match s.chars().last() {
                Some(c) => Value::string(&c.to_string()),
                None => Value::Nothing,
            },
            Value::Lambda(lam) => {
                if lam.body.is_truthy() {
                    lam.body.clone()
                } else {
                    Value::Nothing
                }
            }
            _ => Value::Nothing,
        }
    }

    pub fn place_lead(&self, other: &Value) -> Value {
        if other.is_nothing() {
            return self.clone();
        }
        match self {
            Value::Expression(e) => Value::Expression(e.place_lead(other.clone())),
            Value::Scope(e) => Value::Scope(e.place_lead(other.clone())),
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len() + 1);
                out.push(other.clone());
                out.extend(items.iter().cloned());
                Value::list(out)
            }
            Value::String(s) => match other {
                Value::String(o) => Value::string(&format!("{o}{s}")),
                _ => Value::Nothing,
            },
            _ => Value::Nothing,
        }
    }

    pub fn shift_lead(&self) -> Value {
        match self {
            Value::Expression(e) => Value::Expression(e.shift_lead()),
            Value::Scope(e) => Value::Scope(e.shift_lead()),
            Value::List(items) => {
                if items.is_empty() {
                    self.clone()
                } else {
                    Value::list(items[1..].to_vec())
                }
            }
            Value::String(s) => {
                let mut chars = s.chars();
                match chars.next() {
                    Some(_) => Value::string(chars.as_str()),
                    None => self.clone(),
                }
            }
            _ => Value::Nothing,
        }
    }

    pub fn place_last(&self, other: &Value) -> Value {
        if other.is_nothing() {
            return self.clone();
        }
        match self {
            Value::Expression(e) => Value::Expression(e.place_last(other.clone())),
            Value::Scope(e) => Value::Scope(e.place_last(other.clone())),
            Value::List(items) => {
                let mut out = items.as_ref().clone();
                out.push(other.clone());
                Value::list(out)
            }
            Value::String(s) => match other {
                Value::String(o) => Value::string(&format!("{s}{o}")),
                _ => Value::Nothing,
            },
            _ => Value::Nothing,
        }
    }

    pub fn shift_last(&self) -> Value {
        match self {
            Value::Expression(e) => Value::Expression(e.shift_last()),
            Value::Scope(e) => Value::Scope(e.shift_last()),
            Value::List(items) => {
                if items.is_empty() {
                    self.clone()
                } else {
                    Value::list(items[..items.len() - 1].to_vec())
                }
            }
            Value::String(s) => {
                let mut chars: Vec<char> = s.chars().collect();
                if chars.pop().is_some() {
                    Value::string(&chars.into_iter().collect::<String>())
                } else {
                    self.clone()
                }
            }
            _ => Value::Nothing,
        }
    }

    pub fn reverse(&self) -> Value {
        match self {
            Value::Expression(e) => Value::Expression(e.reverse()),
            Value::Scope(e) => Value::Scope(e.reverse()),
            Value::List(items) => {
                let mut out = items.as_ref().clone();
                out.reverse();
                Value::list(out)
            }
            Value::String(s) => Value::string(&s.chars().rev().collect::<String>()),
            _ => self.clone(),
        }
    }

    /// Ordinal access. Indices are 1-based; negative indices count from the
    /// end; index 0 and indices past either end yield *nothing*.
    pub fn get(&self, key: &Value) -> Value {
        let Some(index) = ordinal(key, self.size()) else {
            return Value::Nothing;
        };
        match self {
            Value::Expression(e) | Value::Scope(e) => {
                e.get_index(index).unwrap_or(Value::Nothing)
            }
            Value::List(items) => items.get(index).cloned().unwrap_or(Value::Nothing),
            Value::String(s) => match s.chars().nth(index) {
                Some(c) => Value::string(&c.to_string()),
                None => Value::Nothing,
            },
            _ => Value::Nothing,
        }
    }

    /// Ordinal replacement, same index rules as [`Value::get`]. Produces a
    /// new value; invalid indices or unsupported targets yield *nothing*.
    pub fn set(&self, key: &Value, val: &Value) -> Value {
        let Some(index) = ordinal(key, self.size()) else {
            return Value::Nothing;
        };
        match self {
            Value::Expression(e) => e
                .with_replaced(index, val.clone())
                .map(Value::Expression)
                .unwrap_or(Value::Nothing),
            Value::Scope(e) => e
                .with_replaced(index, val.clone())
                .map(Value::Scope)
                .unwrap_or(Value::Nothing),
            Value::List(items) => {
                if index >= items.len() {
                    return Value::Nothing;
                }
                let mut out = items.as_ref().clone();
                out[index] = val.clone();
                Value::list(out)
            }
            _ => Value::Nothing,
        }
    }

    // -- Stringification --

    /// The round-trippable form: strings quoted, numbers in number quotes.
    pub fn repr(&self) -> String {
        match self {
            Value::Nothing => "nothing".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => format!("'{n}'"),
            Value::String(s) => format!("\"{s}\""),
            Value::Symbol(s) => resolve(*s),
            Value::OpCall(op) => op.token().to_string(),
            Value::Error(kind) => format!("error<{kind}>"),
            Value::Expression(e) => {
                let items: Vec<String> = e.iter().map(Value::repr).collect();
                format!("({})", items.join(" "))
            }
            Value::Scope(e) => {
                let items: Vec<String> = e.iter().map(Value::repr).collect();
                items.join(" ")
            }
            Value::List(items) => {
                let items: Vec<String> = items.iter().map(Value::repr).collect();
                format!("[{}]", items.join(" "))
            }
            Value::Lambda(lam) => {
                let args: Vec<String> = lam.args.iter().map(Value::repr).collect();
                format!("lambda({}): {} ;", args.join(" "), lam.body.repr())
            }
        }
    }
}

fn ordering_to_real(ord: std::cmp::Ordering) -> f64 {
    match ord {
        std::cmp::Ordering::Less => -1.0,
        std::cmp::Ordering::Equal => 0.0,
        std::cmp::Ordering::Greater => 1.0,
    }
}

fn sequence_equality<'a>(
    a: impl Iterator<Item = &'a Value>,
    b: impl Iterator<Item = &'a Value>,
    same_len: bool,
) -> f64 {
    if !same_len {
        return f64::NAN;
    }
    for (x, y) in a.zip(b) {
        if x.compare(y) != 0.0 {
            return f64::NAN;
        }
    }
    0.0
}

fn numeric_op(a: &Value, b: &Value, op: fn(&Number, &Number) -> Number) -> Value {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Value::Number(op(x, y)),
        _ => Value::Nothing,
    }
}

/// Resolve a 1-based, possibly negative ordinal key against a size.
fn ordinal(key: &Value, size: usize) -> Option<usize> {
    let Value::Number(n) = key else {
        return None;
    };
    if n.is_nan() || n.is_complex() || n.re().fract() != 0.0 {
        return None;
    }
    let raw = n.re() as i64;
    let size = size as i64;
    if raw == 0 || raw.abs() > size {
        return None;
    }
    let index = if raw > 0 { raw - 1 } else { size + raw };
    Some(index as usize)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == 0.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => write!(f, "nothing"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Symbol(s) => with_resolved(*s, |name| f.write_str(name)),
            Value::OpCall(op) => write!(f, "{op}"),
            Value::Error(kind) => write!(f, "error<{kind}>"),
            Value::Expression(e) => {
                write!(f, "(")?;
                for (i, item) in e.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Value::Scope(e) => {
                for (i, item) in e.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Lambda(lam) => {
                write!(f, "lambda(")?;
                for (i, item) in lam.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "): {} ;", lam.body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::number(n)
    }

    #[test]
    fn truthiness_rules() {
        assert!(!Value::Nothing.is_truthy());
        assert!(!Value::Expression(Expr::new()).is_truthy());
        assert!(Value::Expression(Expr::single(num(1.0))).is_truthy());
        assert!(Value::boolean(true).is_truthy());
        assert!(!Value::boolean(false).is_truthy());
        assert!(num(2.0).is_truthy());
        assert!(!num(0.0).is_truthy());
        assert!(Value::string("x").is_truthy());
        assert!(!Value::string("").is_truthy());
        assert!(Value::error("undef_var").is_truthy());
    }

    #[test]
    fn compare_agrees_with_difference_on_reals() {
        for (a, b) in [(1.0, 2.0), (5.0, 3.0), (4.0, 4.0), (-1.0, 1.0)] {
            let got = num(a).compare(&num(b));
            let diff = a - b;
            if diff == 0.0 {
                assert_eq!(got, 0.0);
            } else {
                assert_eq!(got.signum(), diff.signum());
            }
        }
    }

    #[test]
    fn cross_variant_comparison_is_nan() {
        assert!(num(1.0).compare(&Value::string("1")).is_nan());
        assert!(Value::Nothing.compare(&num(0.0)).is_nan());
        assert!(Value::Number(Number::complex(1.0, 2.0))
            .compare(&Value::string("x"))
            .is_nan());
    }

    #[test]
    fn structural_equality() {
        let a = Value::Expression(Expr::from_iter([num(1.0), num(2.0)]));
        let b = Value::Expression(Expr::from_iter([num(1.0), num(2.0)]));
        let c = Value::Expression(Expr::from_iter([num(1.0)]));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(Value::symbol("x"), Value::symbol("x"));
        assert_ne!(Value::symbol("x"), Value::symbol("y"));
    }

    #[test]
    fn arithmetic_is_number_only() {
        assert_eq!(num(3.0).add(&num(4.0)), num(7.0));
        assert!(Value::string("a").add(&num(1.0)).is_nothing());
        assert!(num(1.0).add(&Value::Nothing).is_nothing());
    }

    #[test]
    fn ordinal_get_on_lists() {
        let items = Value::list(vec![num(10.0), num(20.0), num(30.0)]);
        assert_eq!(items.get(&num(1.0)), num(10.0));
        assert_eq!(items.get(&num(3.0)), num(30.0));
        assert_eq!(items.get(&num(-1.0)), num(30.0));
        assert_eq!(items.get(&num(-3.0)), num(10.0));
        assert!(items.get(&num(0.0)).is_nothing());
        assert!(items.get(&num(4.0)).is_nothing());
        assert!(items.get(&num(-4.0)).is_nothing());
        assert!(items.get(&Value::string("1")).is_nothing());
    }

    #[test]
    fn ordinal_set_builds_a_new_list() {
        let items = Value::list(vec![num(1.0), num(2.0)]);
        let replaced = items.set(&num(2.0), &num(9.0));
        assert_eq!(replaced.get(&num(2.0)), num(9.0));
        assert_eq!(items.get(&num(2.0)), num(2.0));
        assert!(items.set(&num(3.0), &num(9.0)).is_nothing());
    }

    #[test]
    fn string_sequence_operations() {
        let s = Value::string("abc");
        assert_eq!(s.lead(), Value::string("a"));
        assert_eq!(s.last(), Value::string("c"));
        assert_eq!(s.shift_lead(), Value::string("bc"));
        assert_eq!(s.shift_last(), Value::string("ab"));
        assert_eq!(s.reverse(), Value::string("cba"));
        assert_eq!(s.place_lead(&Value::string("x")), Value::string("xabc"));
        assert_eq!(s.place_last(&Value::string("x")), Value::string("abcx"));
        assert_eq!(s.size(), 3);
        assert_eq!(s.get(&num(2.0)), Value::string("b"));
    }

    #[test]
    fn str_and_repr_forms() {
        let e = Value::Expression(Expr::from_iter([num(1.0), num(2.0), num(3.0)]));
        assert_eq!(e.to_string(), "(1 2 3)");
        assert_eq!(e.repr(), "('1' '2' '3')");
        assert_eq!(Value::string("hi").to_string(), "hi");
        assert_eq!(Value::string("hi").repr(), "\"hi\"");
        assert_eq!(Value::error("undef_var").to_string(), "error<undef_var>");
        assert_eq!(Value::op_call(OpCode::Add).repr(), "+");
        assert_eq!(
            Value::list(vec![num(1.0), num(2.0)]).repr(),
            "['1' '2']"
        );
    }

    #[test]
    fn lambda_walks_as_a_sequence() {
        let args = Expr::single(Value::symbol("x"));
        let body = Value::Expression(Expr::from_iter([
            Value::symbol("x"),
            Value::symbol("x"),
            Value::op_call(OpCode::Mul),
        ]));
        let lam = Value::Lambda(Rc::new(Lambda::new(args.clone(), body.clone())));
        assert_eq!(lam.lead(), Value::Expression(args));
        assert_eq!(lam.last(), body);
        assert!(lam.is_truthy());
        assert_eq!(lam.size(), 1);
    }

    #[test]
    fn capture_skips_the_enclosing_self_cycle() {
        let mut outer = ScopeMap::new();
        outer.insert(intern("self"), Value::symbol("f"));
        outer.insert(intern("f"), Value::number(1.0));
        outer.insert(intern("y"), Value::number(2.0));

        let mut lam = Lambda::new(Expr::new(), Value::Nothing);
        lam.bind_scope(&outer);

        assert!(!lam.variables.contains_key(&intern("f")));
        assert_eq!(lam.variables.get(&intern("y")), Some(&Value::number(2.0)));
    }
}
