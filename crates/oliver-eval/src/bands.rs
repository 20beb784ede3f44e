use std::rc::Rc;

use oliver_core::{Band, Expr, Lambda, OpCode, Value};

use crate::machine::{trim, Machine};

impl Machine {
    /// Route an opcode to its band. Within a band a match selects the
    /// concrete behaviour; band membership alone decides the routing.
    pub(crate) fn dispatch(&mut self, op: OpCode) {
        let Some(band) = op.band() else {
            return;
        };
        match band {
            Band::PrefixUnary => self.prefix_unary(op),
            Band::PostfixUnary => self.postfix_unary(op),
            Band::InfixBinary => self.rewrite_to_postfix(op),
            Band::PostfixBinary => self.postfix_binary(op),
            Band::Stack => self.stack_operators(op),
            Band::FunctionScope => self.function_scope(op),
            Band::Sequence => self.sequence_operators(op),
            Band::Io => self.io_operators(op),
            Band::ExtendedLogic => self.extended_logic(op),
            Band::Control => self.control(op),
        }
    }

    /// `opr x` rewrites to the staged expression `(x OPR)`.
    fn prefix_unary(&mut self, op: OpCode) {
        let x = self.take_code();
        let post = op.postfix_form().unwrap_or(OpCode::Nothing);
        let exp = Expr::new()
            .place_lead(Value::op_call(post))
            .place_lead(x);
        self.place_code(Value::Expression(exp));
    }

    fn postfix_unary(&mut self, op: OpCode) {
        let x = self.pop_stack();
        let y = match op {
            OpCode::Is => Value::boolean(x.is_truthy()),
            OpCode::ApplyNeg => x.neg(),
            OpCode::ApplyNot => Value::boolean(x.l_not()),
            _ => Value::Nothing,
        };
        self.push_stack(y);
    }

    /// The infix rewrite: stage the uppercase partner, then the right
    /// operand, so the operand evaluates before the operator runs. The
    /// left operand is already on its way to the stack. Lowercase sequence
    /// operators use the same rewrite.
    fn rewrite_to_postfix(&mut self, op: OpCode) {
        let x = self.take_code();
        let post = op.postfix_form().unwrap_or(OpCode::Nothing);
        self.place_code(Value::op_call(post));
        self.place_code(x);
    }

    fn postfix_binary(&mut self, op: OpCode) {
        let y = self.pop_stack();
        let x = self.pop_stack();
        let z = match op {
            OpCode::ApplyAnd => Value::boolean(x.l_and(&y)),
            OpCode::ApplyOr => Value::boolean(x.l_or(&y)),
            OpCode::ApplyXor => Value::boolean(x.l_xor(&y)),

            OpCode::ApplyEq => Value::boolean(x.compare(&y) == 0.0),
            OpCode::ApplyNe => Value::boolean(x.compare(&y) != 0.0),
            OpCode::ApplyLt => Value::boolean(x.compare(&y) < 0.0),
            OpCode::ApplyLe => Value::boolean(x.compare(&y) <= 0.0),
            OpCode::ApplyGt => Value::boolean(x.compare(&y) > 0.0),
            OpCode::ApplyGe => Value::boolean(x.compare(&y) >= 0.0),

            OpCode::ApplyAdd => x.add(&y),
            OpCode::ApplySub => x.sub(&y),
            OpCode::ApplyMul => x.mul(&y),
            OpCode::ApplyDiv => x.div(&y),
            OpCode::ApplyMod => x.modulo(&y),
            OpCode::ApplyFloorDiv => x.floor_div(&y),
            OpCode::ApplyRem => x.rem(&y),
            OpCode::ApplyPow => x.pow(&y),

            _ => Value::Nothing,
        };
        self.push_stack(z);
    }

    fn stack_operators(&mut self, op: OpCode) {
        match op {
            OpCode::StackDump => {
                let mut result = Expr::new();
                for value in self.stack.iter() {
                    result = result.place_lead(value.clone());
                }
                self.push_stack(Value::Expression(result));
            }
            OpCode::Depth => {
                let depth = self.stack.len();
                self.push_stack(Value::number(depth as f64));
            }
            OpCode::MaxDepth => {
                self.push_stack(Value::number(self.max_stack_size as f64));
            }
            OpCode::SetStack => {
                let new_stack = self.take_code();
                let new_stack = self.chase(new_stack);
                self.stack.clear();
                if let Value::Expression(mut items) = new_stack {
                    while !items.is_empty() {
                        let value = items.pop_lead();
                        self.push_stack(value);
                    }
                }
            }
            _ => {}
        }
    }

    fn function_scope(&mut self, op: OpCode) {
        match op {
            OpCode::BeginScope => {
                self.scopes.push(Default::default());
            }
            OpCode::EndScope => {
                self.scopes.pop();
            }

            // The postfix half of `let`: the evaluated value arrives on the
            // stack, the target symbol waits in code.
            OpCode::ApplyLet => {
                let val = self.pop_stack();
                let var = self.take_code();
                if let Value::Symbol(name) = var {
                    self.set_symbol(name, val);
                }
            }

            OpCode::Let => self.let_operator(),
            OpCode::Def => self.def_operator(),
            OpCode::Bind => self.bind_operator(),
            OpCode::Return => self.return_operator(),

            // Quote-one: the next token reaches the stack unevaluated.
            OpCode::Relent => {
                let arg = self.take_code();
                let arg = self.chase(arg);
                self.push_stack(arg);
            }

            _ => {}
        }
    }

    /// `let vars = vals`. Lambdas bind directly; any other value is staged
    /// as `val LET var` so normal stack discipline delivers the evaluated
    /// value to the binding.
    fn let_operator(&mut self) {
        let vars = self.take_code();
        let oper = self.take_code();
        let vals = self.take_code();

        if oper.op_code() != OpCode::Eq {
            return;
        }

        let (mut vars, mut vals) = match vars {
            Value::Expression(v) => (
                v,
                match vals {
                    Value::Expression(e) => e,
                    other => Expr::single(other),
                },
            ),
            other => (Expr::single(other), Expr::single(vals)),
        };

        while !vars.is_empty() {
            let var = vars.pop_lead();
            let val = vals.pop_lead();

            if matches!(val, Value::Lambda(_)) {
                if let Value::Symbol(name) = var {
                    self.set_symbol(name, val);
                }
            } else {
                self.place_code(var);
                self.place_code(Value::op_call(OpCode::ApplyLet));
                self.place_code(val);
            }
        }
    }

    /// `def name args body`: build the lambda, snapshot the current
    /// non-global frame into its capture, install the self-references, and
    /// stage a `let` to bind it under its name.
    fn def_operator(&mut self) {
        let var = self.take_code();
        let args = self.take_code();
        let body = self.take_code();

        let args = match args {
            Value::Expression(e) => e,
            Value::Nothing => Expr::new(),
            other => Expr::single(other),
        };

        let mut lam = Lambda::new(args, body);

        if self.scopes.len() > 1 {
            // The global frame never joins a capture.
            if let Some(frame) = self.scopes.last() {
                lam.bind_scope(frame);
            }
        }

        if let Value::Symbol(name) = &var {
            // The name resolves to the lambda and `self` resolves to the
            // name, so symbol chasing completes the recursion loop.
            let plain = Value::Lambda(Rc::new(lam.clone()));
            lam.bind_variable(*name, plain);
            lam.bind_variable(Machine::self_key(), Value::Symbol(*name));
        }

        self.place_code(Value::Lambda(Rc::new(lam)));
        self.place_code(Value::op_call(OpCode::Eq));
        self.place_code(var);
        self.place_code(Value::op_call(OpCode::Let));
    }

    /// `args bind name`: rebuild the named lambda's capture map with each
    /// argument symbol resolved in the current scope, and rebind the name
    /// to the replacement. The argument names arrive on the stack as an
    /// unevaluated list.
    fn bind_operator(&mut self) {
        let name = self.take_code();
        let args = self.pop_stack();

        let target = self.chase(name.clone());
        let Value::Lambda(lam) = target else {
            return;
        };

        let elements: Vec<Value> = match &args {
            Value::List(items) => items.as_ref().clone(),
            Value::Expression(e) | Value::Scope(e) => e.iter().cloned().collect(),
            _ => Vec::new(),
        };

        let mut replacement = (*lam).clone();
        for arg in elements {
            if let Value::Symbol(arg_name) = arg {
                let val = self.chase(self.get_symbol(arg_name));
                replacement.bind_variable(arg_name, val);
            }
        }

        if let Value::Symbol(name) = name {
            self.set_symbol(name, Value::Lambda(Rc::new(replacement)));
        }
    }

    /// `return args`: resolve the return values, drain the current frame's
    /// code to its `end_scope`, and re-stage the values after it so they
    /// become the function's result.
    fn return_operator(&mut self) {
        let args = self.take_code();
        let args = match args {
            Value::Expression(e) => e,
            Value::Nothing => Expr::new(),
            other => Expr::single(other),
        };

        let mut values = Vec::new();
        for item in args.iter() {
            values.push(self.chase(item.clone()));
        }

        loop {
            if self.code.is_empty() {
                break;
            }
            let item = self.take_code();
            if item.op_code() == OpCode::EndScope {
                break;
            }
        }

        for value in values.into_iter().rev() {
            self.place_code(value);
        }
        self.place_code(Value::op_call(OpCode::EndScope));
    }

    fn sequence_operators(&mut self, op: OpCode) {
        match op {
            OpCode::Len | OpCode::Lead | OpCode::Last | OpCode::PlaceLead | OpCode::PlaceLast
            | OpCode::ShiftLead | OpCode::ShiftLast => self.rewrite_to_postfix(op),

            OpCode::ApplyLen => {
                let s = self.pop_stack();
                self.push_stack(Value::number(s.size() as f64));
            }
            OpCode::ApplyLead => {
                let s = self.pop_stack();
                let r = s.lead();
                self.push_stack(r);
            }
            OpCode::ApplyLast => {
                let s = self.pop_stack();
                let r = s.last();
                self.push_stack(r);
            }
            OpCode::ApplyPlaceLead => {
                let l = self.pop_stack();
                let n = self.pop_stack();
                self.push_stack(l.place_lead(&n));
            }
            OpCode::ApplyPlaceLast => {
                let n = self.pop_stack();
                let l = self.pop_stack();
                self.push_stack(l.place_last(&n));
            }
            OpCode::ApplyShiftLead => {
                let l = self.pop_stack();
                self.push_stack(l.shift_lead());
            }
            OpCode::ApplyShiftLast => {
                let l = self.pop_stack();
                self.push_stack(l.shift_last());
            }

            OpCode::Iterable => {
                let t = self.pop_stack();
                self.push_stack(Value::boolean(t.is_iterable()));
            }

            // `obj . [i]` expands to GET, `obj . [i = v]` to SET.
            OpCode::Index => {
                let index = self.take_code();
                let Value::List(items) = index else {
                    return;
                };
                if items.len() == 1 {
                    self.place_code(Value::op_call(OpCode::ApplyGet));
                    self.place_code(items[0].clone());
                } else if items.len() == 3 && items[1].op_code() == OpCode::Eq {
                    self.place_code(Value::op_call(OpCode::ApplySet));
                    self.place_code(items[2].clone());
                    self.place_code(items[0].clone());
                }
            }

            OpCode::ApplyGet => {
                let index = self.pop_stack();
                let object = self.pop_stack();
                self.push_stack(object.get(&index));
            }
            OpCode::ApplySet => {
                let value = self.pop_stack();
                let index = self.pop_stack();
                let object = self.pop_stack();
                self.push_stack(object.set(&index, &value));
            }

            _ => {}
        }
    }

    fn io_operators(&mut self, op: OpCode) {
        if op == OpCode::Print {
            let x = self.pop_stack();
            println!("{x}");
        }
    }

    fn extended_logic(&mut self, op: OpCode) {
        match op {
            // The predicate arrives on the stack, the consequent waits in
            // code. A truthy predicate consumes a directly-following
            // `else` guard and its alternative before staging the
            // consequent; a falsy one discards the consequent and lets the
            // alternative run.
            OpCode::Imply => {
                let p = self.pop_stack();
                let q = self.take_code();
                if p.is_truthy() {
                    if self.peek_code().op_code() == OpCode::Else {
                        self.take_code();
                        self.take_code();
                    }
                    self.place_code(q);
                }
            }

            // Only meaningful directly before an `imply`, where it stands
            // in for an always-true predicate.
            OpCode::Else => {
                if self.peek_code().op_code() == OpCode::Imply {
                    self.push_stack(Value::boolean(true));
                }
            }

            OpCode::Cond => self.cond_operator(),
            OpCode::Loop => self.loop_operator(),

            OpCode::IsConst => {
                let x = self.take_code();
                let truth = matches!(x, Value::OpCall(_));
                self.push_stack(Value::boolean(truth));
            }
            OpCode::IsVar => {
                let x = self.take_code();
                let truth = match x {
                    Value::Symbol(name) => {
                        self.scopes.iter().any(|frame| frame.contains_key(&name))
                    }
                    _ => false,
                };
                self.push_stack(Value::boolean(truth));
            }

            _ => {}
        }
    }

    /// `cond` consumes the rest of its code frame as alternating
    /// predicate/consequent pairs (an `else` predicate is the default
    /// clause) and rewrites them into a right-nested `imply … else …`
    /// chain. An empty pair list degenerates to nothing.
    fn cond_operator(&mut self) {
        let mut conditions = if self.frame_ended {
            Expr::new()
        } else {
            match self.code.pop() {
                Some(frame) => trim(frame),
                None => Expr::new(),
            }
        };

        if matches!(conditions.lead(), Value::OpCall(_)) {
            conditions = conditions.shift_lead();
        }

        let mut pairs: Vec<(Value, Value)> = Vec::new();
        while !conditions.is_empty() {
            let p = conditions.pop_lead();
            let q = conditions.pop_lead();
            if matches!(q, Value::Expression(_)) {
                pairs.push((p, q));
            } else {
                break;
            }
        }

        let Some((p, q)) = pairs.pop() else {
            return;
        };

        let mut chain = Expr::new()
            .place_lead(Value::Expression(Expr::new()))
            .place_lead(Value::op_call(OpCode::Else))
            .place_lead(q)
            .place_lead(Value::op_call(OpCode::Imply))
            .place_lead(p);

        while let Some((p, q)) = pairs.pop() {
            chain = Expr::new()
                .place_lead(Value::Expression(chain))
                .place_lead(Value::op_call(OpCode::Else))
                .place_lead(q)
                .place_lead(Value::op_call(OpCode::Imply))
                .place_lead(p);
        }

        self.place_code(Value::Expression(chain));
    }

    /// `loop p q` stages `p imply q else END loop p q` in a fresh code
    /// frame. While `p` holds, the body runs and `loop` re-stages the
    /// whole sequence; when `p` goes falsy, `END` pops the frame and the
    /// trailing re-stage is discarded with it.
    fn loop_operator(&mut self) {
        let p = self.take_code();
        let q = self.take_code();

        self.code.push(Expr::new());

        self.place_code(q.clone());
        self.place_code(p.clone());
        self.place_code(Value::op_call(OpCode::Loop));
        self.place_code(Value::op_call(OpCode::End));
        self.place_code(Value::op_call(OpCode::Else));
        self.place_code(q);
        self.place_code(Value::op_call(OpCode::Imply));
        self.place_code(p);
    }

    fn control(&mut self, op: OpCode) {
        match op {
            OpCode::End => {
                self.code.pop();
            }
            OpCode::Break => {
                self.running = false;
            }
            _ => {}
        }
    }
}
