use oliver_core::{intern, Expr, OliverError, OpCode, ScopeMap, Spur, Value};

/// The dual-queue evaluator.
///
/// Three structures drive everything: a *code* stack of expressions (the
/// head of the topmost expression is the next token), a bounded *value
/// stack* of results, and a stack of lexical *scope* frames. One uniform
/// rule governs the loop: any value that is not an op_call is pushed to the
/// value stack; any op_call executes. Lowercase operators keep that rule
/// honest by rewriting themselves into postfix on the fly: `x + y` becomes
/// `x y ADD` in flight, so by the time an uppercase opcode runs, its
/// operands are already on the stack.
pub struct Machine {
    pub(crate) code: Vec<Expr>,
    pub(crate) stack: Vec<Value>,
    pub(crate) scopes: Vec<ScopeMap>,
    pub(crate) max_stack_size: usize,
    pub(crate) running: bool,
    /// Whether the last `take_code` drained its frame. `cond` consumes the
    /// remainder of the frame it appeared in, which is empty when the
    /// opcode was that frame's final token.
    pub(crate) frame_ended: bool,
}

impl Machine {
    pub const DEFAULT_STACK_LIMIT: usize = 2048;

    pub fn new() -> Machine {
        Machine::with_stack_limit(Machine::DEFAULT_STACK_LIMIT)
    }

    pub fn with_stack_limit(max_stack_size: usize) -> Machine {
        Machine {
            code: Vec::new(),
            stack: Vec::new(),
            scopes: Vec::new(),
            max_stack_size,
            running: false,
            frame_ended: false,
        }
    }

    /// Evaluate one expression to a fixed point and return the result
    /// stack as an expression in insertion order. Scopes and the value
    /// stack persist across calls, so a machine can serve a REPL.
    pub fn eval(&mut self, program: Value) -> Value {
        let Value::Expression(exp) = program else {
            return Value::Nothing;
        };
        if self.scopes.is_empty() {
            self.scopes.push(ScopeMap::new());
        }
        let exp = trim(exp);
        if !exp.is_empty() {
            self.code.push(exp);
        }
        self.run();
        self.result_stack()
    }

    /// The value stack, bottom first.
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn result_stack(&self) -> Value {
        let mut result = Expr::new();
        for value in self.stack.iter().rev() {
            result = result.place_lead(value.clone());
        }
        Value::Expression(result)
    }

    // ── The fixed-point loop ──────────────────────────────────────

    fn run(&mut self) {
        self.running = true;

        loop {
            let mut next = self.take_code();

            while let Value::Symbol(name) = next {
                next = self.get_symbol(name);
            }

            match next {
                Value::Expression(e) | Value::Scope(e) => {
                    let e = trim(e);
                    if !e.is_empty() {
                        self.code.push(e);
                    }
                }
                Value::Lambda(lam) => self.apply_lambda(&lam),
                Value::OpCall(op) => self.dispatch(op),
                Value::Nothing => {}
                value => self.push_stack(value),
            }

            if self.code.is_empty() || !self.running {
                break;
            }
        }
    }

    /// Apply a lambda: install its capture as a fresh frame, consume one
    /// code token per formal, and stage the body followed by `end_scope`.
    ///
    /// Plain argument values bind immediately. An expression-valued
    /// argument is staged through the machine's own `val LET name` binding
    /// discipline instead, so it evaluates left-to-right before the body
    /// runs and the frame receives its result rather than raw code.
    fn apply_lambda(&mut self, lam: &oliver_core::Lambda) {
        self.scopes.push(lam.variables.clone());

        let mut formals = lam.args.clone();
        let mut staged: Vec<(Spur, Value)> = Vec::new();

        while !formals.is_empty() {
            let var = formals.pop_lead();
            let mut val = self.take_code();
            while let Value::Symbol(name) = val {
                val = self.get_symbol(name);
            }
            if let Value::Symbol(name) = var {
                match val {
                    Value::Expression(_) | Value::Scope(_) => staged.push((name, val)),
                    value => {
                        if let Some(frame) = self.scopes.last_mut() {
                            frame.insert(name, value);
                        }
                    }
                }
            }
        }

        self.place_code(Value::op_call(OpCode::EndScope));
        self.place_code(lam.body.clone());

        for (name, arg) in staged.into_iter().rev() {
            self.place_code(Value::Symbol(name));
            self.place_code(Value::op_call(OpCode::ApplyLet));
            self.place_code(arg);
        }
    }

    // ── Code queue access ─────────────────────────────────────────

    /// Pop the next token off the head of the topmost code expression,
    /// dropping expressions off the code stack as they drain.
    pub(crate) fn take_code(&mut self) -> Value {
        loop {
            let Some(top) = self.code.last_mut() else {
                self.frame_ended = true;
                return Value::Nothing;
            };
            if top.is_empty() {
                self.code.pop();
                continue;
            }
            let value = top.pop_lead();
            let drained = top.is_empty();
            if drained {
                self.code.pop();
            }
            self.frame_ended = drained;
            return value;
        }
    }

    pub(crate) fn peek_code(&self) -> Value {
        match self.code.last() {
            Some(top) => top.lead(),
            None => Value::Nothing,
        }
    }

    /// Stage a value at the head of the current code expression. With no
    /// code left, the value opens a fresh frame so trailing rewrites are
    /// not lost.
    pub(crate) fn place_code(&mut self, value: Value) {
        match self.code.last_mut() {
            Some(top) => *top = top.place_lead(value),
            None => {
                let frame = Expr::single(value);
                if !frame.is_empty() {
                    self.code.push(frame);
                }
            }
        }
    }

    // ── Value stack access ────────────────────────────────────────

    /// Push within the configured bound. Crossing the bound pushes a
    /// single `stack_overflow` error; pushes beyond that are dropped.
    pub(crate) fn push_stack(&mut self, value: Value) {
        if self.stack.len() < self.max_stack_size {
            self.stack.push(value);
        } else if self.stack.len() == self.max_stack_size {
            self.stack.push(Value::error("stack_overflow"));
        }
    }

    pub(crate) fn pop_stack(&mut self) -> Value {
        match self.stack.pop() {
            Some(value) => value,
            None => Value::error("stack_underflow"),
        }
    }

    // ── Scope access ──────────────────────────────────────────────

    pub(crate) fn get_symbol(&self, name: Spur) -> Value {
        for frame in self.scopes.iter().rev() {
            if let Some(value) = frame.get(&name) {
                return value.clone();
            }
        }
        Value::error("undef_var")
    }

    /// Chase a value through symbol indirections until it is not a symbol.
    pub(crate) fn chase(&self, mut value: Value) -> Value {
        while let Value::Symbol(name) = value {
            value = self.get_symbol(name);
        }
        value
    }

    /// Bind a name in the innermost frame, resolving symbol values first.
    pub(crate) fn set_symbol(&mut self, name: Spur, value: Value) {
        let value = self.chase(value);
        if let Some(frame) = self.scopes.last_mut() {
            frame.insert(name, value);
        }
    }

    pub(crate) fn self_key() -> Spur {
        intern("self")
    }
}

impl Default for Machine {
    fn default() -> Machine {
        Machine::new()
    }
}

/// Unwrap single-element expressions whose sole element is itself an
/// expression, collapsing the parenthesis bloat the reader introduces.
/// Idempotent by construction.
pub(crate) fn trim(mut exp: Expr) -> Expr {
    while exp.len() == 1 {
        match exp.lead() {
            Value::Expression(inner) => exp = inner,
            _ => break,
        }
    }
    exp
}

/// Read and evaluate a complete source text in a fresh machine.
pub fn eval_source(input: &str) -> Result<Value, OliverError> {
    let program = oliver_reader::read(input)?;
    let mut machine = Machine::new();
    Ok(machine.eval(program))
}
