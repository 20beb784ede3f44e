use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use oliver::{ast_json, dump_tokens, print_ast, Machine};

#[derive(Parser)]
#[command(name = "oliver", about = "Oliver: a dual-queue expression language", version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Source file to execute
    file: Option<String>,

    /// Evaluate an expression and print the result stack
    #[arg(short, long)]
    eval: Option<String>,

    /// Load file(s) into the machine before executing
    #[arg(short, long = "load", action = clap::ArgAction::Append)]
    load: Vec<String>,

    /// Write the compiled token stream next to the input with extension .oll
    #[arg(long)]
    dump_tokens: bool,

    /// Suppress the input/result echo and the REPL banner
    #[arg(short, long)]
    quiet: bool,

    /// Enter the REPL after running a file or expression
    #[arg(short, long)]
    interactive: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse source and display the expression tree
    Ast {
        /// File to parse
        file: Option<String>,

        /// Expression to parse
        #[arg(short, long)]
        eval: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Commands::Ast { file, eval, json } => run_ast(file, eval, json),
        }
        return;
    }

    let mut machine = Machine::new();

    for load_file in &cli.load {
        match std::fs::read_to_string(load_file) {
            Ok(source) => run_source(&mut machine, &source, true),
            Err(e) => {
                eprintln!("Error reading {load_file}: {e}");
                return;
            }
        }
    }

    if let Some(expr) = &cli.eval {
        run_source(&mut machine, expr, cli.quiet);
        if cli.interactive {
            repl(machine, cli.quiet);
        }
        return;
    }

    if let Some(file) = &cli.file {
        let source = match std::fs::read_to_string(file) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error during runtime: {e}");
                return;
            }
        };
        if cli.dump_tokens {
            write_token_dump(file, &source);
        }
        run_source(&mut machine, &source, cli.quiet);
        if cli.interactive {
            repl(machine, cli.quiet);
        }
        return;
    }

    repl(machine, cli.quiet);
}

/// Parse, echo, evaluate, echo. Reader failures become a single stderr
/// diagnostic; the process still exits 0, matching the runtime contract.
fn run_source(machine: &mut Machine, source: &str, quiet: bool) {
    let program = match oliver::read(source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error during runtime: {e}");
            return;
        }
    };

    if !quiet {
        println!("input code = {}", program.repr());
    }

    let result = machine.eval(program);

    if !quiet {
        println!("result code = {}", result.repr());
    }
}

fn write_token_dump(file: &str, source: &str) {
    match dump_tokens(source) {
        Ok(dump) => {
            let path = std::path::Path::new(file).with_extension("oll");
            if let Err(e) = std::fs::write(&path, dump) {
                eprintln!("Error writing {}: {e}", path.display());
            }
        }
        Err(e) => eprintln!("Error during runtime: {e}"),
    }
}

fn run_ast(file: Option<String>, eval: Option<String>, json: bool) {
    let source = match (&file, &eval) {
        (Some(path), None) => match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error reading {path}: {e}");
                std::process::exit(1);
            }
        },
        (None, Some(expr)) => expr.clone(),
        (Some(_), Some(_)) => {
            eprintln!("Error: cannot specify both a file and --eval");
            std::process::exit(1);
        }
        (None, None) => {
            eprintln!("Error: provide a file or --eval expression");
            std::process::exit(1);
        }
    };

    let program = match oliver::read(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Parse error: {e}");
            std::process::exit(1);
        }
    };

    if json {
        let output = serde_json::to_string_pretty(&ast_json(&program))
            .expect("ast serialization cannot fail");
        println!("{output}");
    } else {
        print_ast(&program, 0);
    }
}

fn repl(mut machine: Machine, quiet: bool) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };
    let history_path = dirs_path().join("history.txt");
    let _ = rl.load_history(&history_path);

    if !quiet {
        println!("Oliver v{}, a dual-queue expression language", env!("CARGO_PKG_VERSION"));
        println!("The stack persists across lines; ,quit to exit\n");
    }

    let mut buffer = String::new();
    let mut in_multiline = false;

    loop {
        let prompt = if in_multiline { "   ... " } else { "oliver> " };
        match rl.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if !in_multiline {
                    match trimmed {
                        ",quit" | ",exit" | ",q" => break,
                        ",stack" => {
                            println!("{}", machine.result_stack().repr());
                            continue;
                        }
                        _ => {}
                    }
                }

                if in_multiline {
                    buffer.push('\n');
                    buffer.push_str(&line);
                } else {
                    buffer = line.clone();
                }

                if !is_balanced(&buffer) {
                    in_multiline = true;
                    continue;
                }

                in_multiline = false;
                let input = buffer.trim().to_string();
                buffer.clear();

                if input.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&input);

                match oliver::read(&input) {
                    Ok(program) => {
                        let result = machine.eval(program);
                        println!("{}", result.repr());
                    }
                    Err(e) => {
                        eprintln!("Error: {e}");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                if in_multiline {
                    buffer.clear();
                    in_multiline = false;
                    println!("^C");
                    continue;
                }
                break;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }
    }

    let _ = std::fs::create_dir_all(dirs_path());
    let _ = rl.save_history(&history_path);
}

/// Balanced when every bracket and scope opener has closed. Strings are
/// opaque; `:=` is not a scope opener.
fn is_balanced(input: &str) -> bool {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if escape {
            escape = false;
            continue;
        }
        if ch == '\\' && in_string {
            escape = true;
            continue;
        }
        if ch == '"' {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ':' => {
                if chars.peek() != Some(&'=') {
                    depth += 1;
                }
            }
            ';' => depth -= 1,
            _ => {}
        }
    }
    depth <= 0 && !in_string
}

fn dirs_path() -> std::path::PathBuf {
    std::env::var("HOME")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join(".oliver")
}
