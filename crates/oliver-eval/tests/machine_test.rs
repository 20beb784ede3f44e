use oliver_core::Value;
use oliver_eval::{eval_source, Machine};

fn eval(input: &str) -> Value {
    eval_source(input).unwrap_or_else(|e| panic!("failed to eval `{input}`: {e}"))
}

fn eval_to_string(input: &str) -> String {
    eval(input).to_string()
}

#[test]
fn literals_push_to_the_stack() {
    assert_eq!(eval_to_string("'42'"), "(42)");
    assert_eq!(eval_to_string("\"hi\" '1' true"), "(hi 1 true)");
}

#[test]
fn bare_literal_grows_the_stack_by_one() {
    let mut machine = Machine::new();
    let before = machine.stack().len();
    machine.eval(oliver_reader::read("'7'").unwrap());
    assert_eq!(machine.stack().len(), before + 1);
}

#[test]
fn infix_operators_rewrite_to_postfix() {
    assert_eq!(eval_to_string("'3' '4' +"), "(7)");
    assert_eq!(eval_to_string("'10' - '4'"), "(6)");
    assert_eq!(eval_to_string("'6' * '7'"), "(42)");
    assert_eq!(eval_to_string("'10' / '4'"), "(2.5)");
    assert_eq!(eval_to_string("'10' mod '3'"), "(1)");
    assert_eq!(eval_to_string("'7' // '2'"), "(3)");
    assert_eq!(eval_to_string("'7' rem '2'"), "(0.5)");
    assert_eq!(eval_to_string("'2' ** '10'"), "(1024)");
}

#[test]
fn comparison_operators() {
    assert_eq!(eval_to_string("'1' < '2'"), "(true)");
    assert_eq!(eval_to_string("'2' <= '2'"), "(true)");
    assert_eq!(eval_to_string("'3' > '4'"), "(false)");
    assert_eq!(eval_to_string("'1' = '1'"), "(true)");
    assert_eq!(eval_to_string("'1' != '1'"), "(false)");
    assert_eq!(eval_to_string("\"a\" = \"a\""), "(true)");
    // Incomparable values are not equal and not ordered.
    assert_eq!(eval_to_string("'1' = \"1\""), "(false)");
    assert_eq!(eval_to_string("'1' < \"1\""), "(false)");
}

#[test]
fn logic_operators() {
    assert_eq!(eval_to_string("true and false"), "(false)");
    assert_eq!(eval_to_string("true or false"), "(true)");
    assert_eq!(eval_to_string("true xor true"), "(false)");
    assert_eq!(eval_to_string("not true"), "(false)");
    assert_eq!(eval_to_string("'0' ?"), "(false)");
    assert_eq!(eval_to_string("'3' ?"), "(true)");
}

#[test]
fn prefix_negation() {
    assert_eq!(eval_to_string("neg '5'"), "(-5)");
    assert_eq!(eval_to_string("-'5'"), "(-5)");
}

#[test]
fn complex_arithmetic() {
    assert_eq!(eval_to_string("'1,2' '3,4' *"), "((-5,+10j))");
    assert_eq!(eval_to_string("'2j' '2j' *"), "(-4)");
    // Operations with no meaning on complex operands collapse to NaN.
    assert_eq!(eval_to_string("'1,1' mod '2'"), "(nan)");
}

#[test]
fn undefined_symbols_are_error_values() {
    assert_eq!(eval_to_string("ghost"), "(error<undef_var>)");
    // Evaluation continues past the error.
    assert_eq!(eval_to_string("ghost '1'"), "(error<undef_var> 1)");
}

#[test]
fn let_binds_evaluated_values() {
    assert_eq!(eval_to_string("let (x) = ('5') x x *"), "(25)");
    assert_eq!(eval_to_string("let (x y) = ('1' '2') x y +"), "(3)");
    assert_eq!(eval_to_string("let (n) = ('4') let (n) = ((n + '1')) n"), "(5)");
    // `:=` is an alias spelling of the let operator.
    assert_eq!(eval_to_string(":= (x) = ('3') x"), "(3)");
}

#[test]
fn scope_blocks_frame_their_bindings() {
    assert_eq!(eval_to_string(": let (x) = ('5') x ;"), "(5)");
    // The binding does not escape the block.
    assert_eq!(
        eval_to_string(": let (x) = ('5') x ; x"),
        "(5 error<undef_var>)"
    );
}

#[test]
fn scope_depth_returns_after_application() {
    let mut machine = Machine::new();
    machine.eval(oliver_reader::read("def idf (x) (x) idf '7'").unwrap());
    assert_eq!(machine.scope_depth(), 1);
    assert_eq!(machine.result_stack().to_string(), "(7)");
}

#[test]
fn lambdas_bind_arguments_in_code_order() {
    assert_eq!(eval_to_string("def sq (x) (x x *) sq '6'"), "(36)");
    assert_eq!(
        eval_to_string("def sub2 (a b) ((a - b)) sub2 '9' '4'"),
        "(5)"
    );
    // Expression arguments evaluate before the body runs.
    assert_eq!(eval_to_string("def sq (x) (x x *) sq ('2' + '1')"), "(9)");
}

#[test]
fn closures_capture_the_definition_frame() {
    assert_eq!(
        eval_to_string("def outer (a) (def inner (b) ((a + b)) inner '5') outer '10'"),
        "(15)"
    );
}

#[test]
fn recursion_through_the_self_reference() {
    assert_eq!(
        eval_to_string(
            "def fact (n) (cond (n <= '1') ('1') else (n fact (n - '1') *)) fact '5'"
        ),
        "(120)"
    );
    assert_eq!(
        eval_to_string(
            "def fib (n) (cond (n < '2') (n) else ((fib (n - '1') fib (n - '2') +))) fib '10'"
        ),
        "(55)"
    );
}

#[test]
fn cond_with_no_pairs_degenerates_to_nothing() {
    assert_eq!(eval_to_string("cond"), "()");
}

#[test]
fn imply_else_guards() {
    assert_eq!(
        eval_to_string("('1' = '1') imply (\"yes\") else (\"no\")"),
        "(yes)"
    );
    assert_eq!(
        eval_to_string("('1' = '2') imply (\"yes\") else (\"no\")"),
        "(no)"
    );
    // Without an else, a falsy predicate leaves nothing behind.
    assert_eq!(eval_to_string("('1' = '2') imply (\"yes\")"), "()");
}

#[test]
fn loop_runs_until_the_predicate_fails() {
    assert_eq!(
        eval_to_string("let (n) = ('3') loop (n > '0') (n let (n) = ((n - '1')))"),
        "(3 2 1)"
    );
    assert_eq!(eval_to_string("loop ('0' ?) ('9')"), "()");
}

#[test]
fn return_exits_the_frame_with_its_values() {
    assert_eq!(
        eval_to_string("def f (x) (return (x) '99') f '5'"),
        "(5)"
    );
    let mut machine = Machine::new();
    machine.eval(oliver_reader::read("def f (x) (return (x) '99') f '5'").unwrap());
    assert_eq!(machine.scope_depth(), 1);
}

#[test]
fn relent_quotes_the_next_token() {
    assert_eq!(eval_to_string("relent (x y)"), "((x y))");
    assert_eq!(eval_to_string("relent (x y) LEN"), "(2)");
}

#[test]
fn bind_extends_a_lambda_capture() {
    assert_eq!(
        eval_to_string("def f (x) (x y +) let (y) = ('10') [y] bind f f '1'"),
        "(11)"
    );
}

#[test]
fn stack_reflection_operators() {
    assert_eq!(eval_to_string("'1' '2' _DEPTH_"), "(1 2 2)");
    assert_eq!(eval_to_string("'1' '2' _STACK_"), "(1 2 (2 1))");
    assert_eq!(eval_to_string("_MAX_DEPTH_"), "(2048)");
    assert_eq!(eval_to_string("'9' _SET_STACK_ ('7' '8')"), "(7 8)");
}

#[test]
fn stack_overflow_is_a_single_error_value() {
    let mut machine = Machine::with_stack_limit(3);
    machine.eval(oliver_reader::read("'1' '2' '3' '4' '5'").unwrap());
    assert_eq!(
        machine.result_stack().to_string(),
        "(1 2 3 error<stack_overflow>)"
    );
}

#[test]
fn sequence_operators_on_strings() {
    assert_eq!(eval_to_string("len \"hello\""), "(5)");
    assert_eq!(eval_to_string("lead \"abc\""), "(a)");
    assert_eq!(eval_to_string("last \"abc\""), "(c)");
    assert_eq!(eval_to_string("<<< \"abc\""), "(bc)");
    assert_eq!(eval_to_string(">>> \"abc\""), "(ab)");
    assert_eq!(eval_to_string("\"abc\" itr?"), "(true)");
    assert_eq!(eval_to_string("'1' itr?"), "(false)");
}

#[test]
fn sequence_operators_on_quoted_expressions() {
    assert_eq!(eval_to_string("relent ('1' '2' '3') LEN"), "(3)");
    assert_eq!(eval_to_string("relent ('1' '2' '3') LEAD"), "(1)");
    assert_eq!(eval_to_string("relent ('1' '2' '3') LAST"), "(3)");
    assert_eq!(eval_to_string("'1' relent ('2' '3') PLACE_LEAD"), "((1 2 3))");
    assert_eq!(eval_to_string("relent ('1' '2') SHIFT_LEAD"), "((2))");
}

#[test]
fn index_operator_expands_to_get_and_set() {
    assert_eq!(eval_to_string("relent ('10' '20' '30') . ['2']"), "(20)");
    assert_eq!(eval_to_string("relent ('10' '20' '30') . ['-1']"), "(30)");
    assert_eq!(eval_to_string("relent ('10' '20') . ['0']"), "()");
    assert_eq!(eval_to_string("relent ('1' '2') . ['1' = '9']"), "((9 2))");
    assert_eq!(eval_to_string("[x y z] . ['2']"), "(y)");
}

#[test]
fn scope_probes() {
    assert_eq!(eval_to_string("var? x"), "(false)");
    assert_eq!(eval_to_string("let (x) = ('1') var? x"), "(true)");
    assert_eq!(eval_to_string("const? +"), "(true)");
    assert_eq!(eval_to_string("const? x"), "(false)");
}

#[test]
fn break_stops_the_loop() {
    assert_eq!(eval_to_string("'1' BREAK '2'"), "(1)");
}

#[test]
fn end_pops_the_current_code_frame() {
    assert_eq!(eval_to_string("'1' ('2' END '3') '4'"), "(1 2 4)");
}

#[test]
fn parenthesis_bloat_is_trimmed() {
    assert_eq!(eval_to_string("(((('6'))))"), "(6)");
}

#[test]
fn machine_state_persists_across_eval_calls() {
    let mut machine = Machine::new();
    machine.eval(oliver_reader::read("let (x) = ('5')").unwrap());
    let result = machine.eval(oliver_reader::read("x x *").unwrap());
    assert_eq!(result.to_string(), "(25)");
}
