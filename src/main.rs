use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use clap::{CommandFactory, Parser};
use numeval::{
    Definition, DefinitionTable, EvaluationContext, ExpressionError, Number, SourceText,
    interpreter::{
        evaluator::core::MAX_CALL_DEPTH,
        lexer::{Lexer, Token},
        parser::{core::Parser as ExpressionParser, definition::parse_definition},
    },
};

const DEFINITIONS_FILE: &str = "num.ini";

const HELP: &str = "\
Interactive commands:

    q                                      Quit.
    help                                   Show this help message.
    <expression>                           Evaluate expression.
    def <name> => <expression>             Define constant.
    def <name>(<params>) => <expression>   Define function.
    defs                                   List all definitions.
    def <name>                             List specific definition.

Definitions may also be specified in a num.ini file, which may be in the current
directory or anywhere in the path. Definitions specified in num.ini do not begin
with the \"def\" keyword. Following are some example definitions:

    def sqrt(n) => n ** 0.5
    def is_prime_helper(n, f) => f * f > n ? 1 : n % f = 0 ? 0 : is_prime_helper(n, f + 2)
    def is_prime(n) => n < 3 ? n = 2 : (n & 1) = 0 ? 0 : is_prime_helper(n, 3)
";

/// num evaluates integer and real expressions, with user-defined constants and
/// recursive functions.
///
/// Without an expression, num reads commands interactively.
#[derive(Parser, Debug)]
#[command(version, about, after_help = HELP)]
struct Args {
    /// Loads definitions from this file instead of searching for num.ini.
    #[arg(short, long, env = "NUM_DEFINITIONS")]
    definitions: Option<PathBuf>,

    /// Starts without loading any definitions file.
    #[arg(long, conflicts_with = "definitions")]
    no_definitions: bool,

    /// Limit on nested calls before evaluation fails.
    #[arg(long, default_value_t = MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Expression to evaluate. Words are joined by spaces.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    expression: Vec<String>,
}

/// State of one num session.
struct Session {
    table:     DefinitionTable,
    max_depth: usize,
}

/// Outcome of an interactive command.
enum Flow {
    Continue,
    Quit,
}

fn main() {
    init_logging();
    let args = Args::parse();
    if is_help_request(&args.expression) {
        if let Err(e) = Args::command().print_help() {
            eprintln!("{e}");
        }
        return;
    }

    let mut session = Session { table:     DefinitionTable::new(),
                                max_depth: args.max_depth, };

    if !args.no_definitions
       && let Some(path) = args.definitions.or_else(find_definitions_file)
       && let Err(e) = session.load_definitions(&path)
    {
        eprintln!("Failed to read the definitions file '{}': {e}", path.display());
    }

    if args.expression.is_empty() {
        if let Err(e) = session.run_interactive() {
            eprintln!("{e}");
            std::process::exit(1);
        }
    } else if let Err(e) = session.evaluate_line(&args.expression.join(" ")) {
        print_error(&e);
        std::process::exit(1);
    }
}

/// `-?` and `/?` ask for help like `--help` does.
fn is_help_request(words: &[String]) -> bool {
    matches!(words.first().map(String::as_str), Some("-?" | "/?"))
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console_logger = fmt::layer().with_writer(io::stderr).with_target(false);

    let subscriber = Registry::default().with(filter).with(console_logger);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install the log subscriber: {e}");
    }
}

/// Looks for num.ini in the current directory, then in each directory on
/// `PATH`.
fn find_definitions_file() -> Option<PathBuf> {
    let local = PathBuf::from(DEFINITIONS_FILE);
    if local.is_file() {
        return Some(local);
    }

    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).map(|dir| dir.join(DEFINITIONS_FILE))
                                .find(|candidate| candidate.is_file())
}

impl Session {
    /// Adds every definition in `path`, one per line.
    ///
    /// A bad line is reported and skipped; later lines are still loaded.
    fn load_definitions(&mut self, path: &Path) -> io::Result<()> {
        let contents = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading definitions");

        for (index, line) in contents.lines().enumerate() {
            if let Err(e) = self.define_line(line) {
                eprintln!("Error: {}, line {}:", path.display(), index + 1);
                print_error(&e);
            }
        }
        Ok(())
    }

    fn define_line(&mut self, line: &str) -> Result<(), ExpressionError> {
        let source = SourceText::new(line)?;
        let mut lexer = Lexer::new(&source)?;
        if lexer.at(&Token::End) {
            return Ok(());
        }
        parse_definition(&mut lexer, &mut self.table)?;
        Ok(())
    }

    fn run_interactive(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        writeln!(stdout, "Num expression evaluator. Type 'help' for usage.")?;
        let mut lines = stdin.lock().lines();
        loop {
            write!(stdout, "\n> ")?;
            stdout.flush()?;

            let Some(line) = lines.next().transpose()? else {
                break;
            };
            match self.run_command(&line) {
                Ok(Flow::Continue) => {},
                Ok(Flow::Quit) => break,
                Err(e) => print_error(&e),
            }
        }
        Ok(())
    }

    /// Runs one line of interactive input.
    fn run_command(&mut self, line: &str) -> Result<Flow, ExpressionError> {
        let source = SourceText::new(line)?;
        let mut lexer = Lexer::new(&source)?;

        let name = match lexer.current() {
            Token::Name(name) => name.clone(),
            Token::End => return Ok(Flow::Continue),
            _ => {
                self.evaluate(&mut lexer)?;
                return Ok(Flow::Continue);
            },
        };

        match name.as_str() {
            "q" => return Ok(Flow::Quit),
            "help" => print!("{HELP}"),
            "defs" => {
                for definition in self.table.iter() {
                    print_definition(definition);
                }
            },
            "def" => {
                lexer.advance()?;
                self.define_or_show(&mut lexer)?;
            },
            _ => self.evaluate(&mut lexer)?,
        }
        Ok(Flow::Continue)
    }

    /// Handles the text after `def`: either a full definition or a bare name
    /// to look up.
    fn define_or_show(&mut self, lexer: &mut Lexer<'_>) -> Result<(), ExpressionError> {
        if let Token::Name(name) = lexer.current() {
            let mut ahead = lexer.clone();
            ahead.advance()?;
            if ahead.at(&Token::End) {
                match self.table.lookup(name) {
                    Some(definition) => print_definition(definition),
                    None => println!("No definition for {name}."),
                }
                return Ok(());
            }
        }
        parse_definition(lexer, &mut self.table)?;
        Ok(())
    }

    fn evaluate_line(&self, line: &str) -> Result<(), ExpressionError> {
        let source = SourceText::new(line)?;
        let mut lexer = Lexer::new(&source)?;
        self.evaluate(&mut lexer)
    }

    fn evaluate(&self, lexer: &mut Lexer<'_>) -> Result<(), ExpressionError> {
        let source = lexer.source();
        let root = ExpressionParser::new(lexer, &self.table, None).parse_full_expression()?;

        let mut context = EvaluationContext::new(&self.table).with_max_depth(self.max_depth);
        let value = context.eval(&root, source)?;
        println!("{source} = {}", format_number(value));
        Ok(())
    }
}

fn format_number(value: Number) -> String {
    match value {
        Number::Integer(n) => format!("{n} ({n:#x})"),
        Number::Real(r) => format!("{r:.6}"),
    }
}

fn print_definition(definition: &Definition) {
    println!("def {definition}");
}

fn print_error(e: &ExpressionError) {
    println!("{}", e.caret());
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn integers_print_with_hex() {
        assert_eq!(format_number(Number::Integer(255)), "255 (0xff)");
        assert_eq!(format_number(Number::Integer(-1)), "-1 (0xffffffffffffffff)");
        assert_eq!(format_number(Number::Real(0.5)), "0.500000");
    }

    #[test]
    fn question_mark_flags_request_help() {
        let words = |line: &str| line.split(' ').map(String::from).collect::<Vec<_>>();

        assert!(is_help_request(&words("-?")));
        assert!(is_help_request(&words("/?")));
        assert!(!is_help_request(&words("-1")));
        assert!(!is_help_request(&words("1 ? 2 : 3")));
        assert!(!is_help_request(&[]));

        let args = Args::try_parse_from(["num", "-?"]).unwrap();
        assert!(is_help_request(&args.expression));
    }

    #[test]
    fn def_without_body_does_not_define() {
        let mut session = Session { table:     DefinitionTable::new(),
                                    max_depth: MAX_CALL_DEPTH, };
        session.run_command("def nothing").unwrap();
        assert!(session.table.is_empty());

        session.run_command("def sq(n) => n * n").unwrap();
        assert!(session.table.lookup("sq").is_some());
        session.run_command("def sq").unwrap();
        assert_eq!(session.table.len(), 1);
    }

    #[test]
    fn quit_command() {
        let mut session = Session { table:     DefinitionTable::new(),
                                    max_depth: MAX_CALL_DEPTH, };
        assert!(matches!(session.run_command("q"), Ok(Flow::Quit)));
        assert!(matches!(session.run_command(""), Ok(Flow::Continue)));
        assert!(matches!(session.run_command("1 + 1"), Ok(Flow::Continue)));
    }

    #[test]
    fn bad_definition_line_is_reported() {
        let mut session = Session { table:     DefinitionTable::new(),
                                    max_depth: MAX_CALL_DEPTH, };
        let err = session.define_line("f(n => n").unwrap_err();
        assert_eq!(err.message(), "Expected ',' or ')' after name.");
        session.define_line("   ").unwrap();
        assert!(session.table.is_empty());
    }
}
