use std::{collections::VecDeque, fs, io};

use frr::{Console, Error};
use walkdir::WalkDir;

/// A console with captured output and scripted input, so whole programs
/// can run inside the test process.
#[derive(Default)]
struct TestConsole {
    output: String,
    input:  VecDeque<String>,
}

impl TestConsole {
    fn with_input(lines: &[&str]) -> Self {
        Self { output: String::new(),
               input:  lines.iter().map(ToString::to_string).collect(), }
    }
}

impl Console for TestConsole {
    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.input
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted input left"))
    }
}

fn run(source: &str) -> Result<String, Error> {
    run_with_input(source, &[])
}

fn run_with_input(source: &str, input: &[&str]) -> Result<String, Error> {
    let mut console = TestConsole::with_input(input);
    frr::run_source(source, &mut console)?;
    Ok(console.output)
}

fn assert_output(source: &str, expected: &str) {
    match run(source) {
        Ok(output) => assert_eq!(output, expected, "wrong output for:\n{source}"),
        Err(e) => panic!("Script failed: {e}\n{source}"),
    }
}

fn assert_failure(source: &str) {
    if run(source).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{source}");
    }
}

#[test]
fn assignment_and_arithmetic() {
    assert_output("programme test\ndébut\navec x: entier\nx <- 3 + 4\nafficher(x)\nfin test", "7");
    assert_output("programme test\ndébut\navec x: entier\nx <- 7 * 9\nafficher(x)\nfin test",
                  "63");
    assert_output("programme test\ndébut\navec x: entier\nx <- 8 - 5\nafficher(x)\nfin test", "3");
    assert_output("programme test\ndébut\navec x: entier\nx <- 7 mod 3\nafficher(x)\nfin test",
                  "1");
    assert_output("programme test\ndébut\navec x: entier\nx <- 7 % 3\nafficher(x)\nfin test", "1");
}

#[test]
fn division_floors_toward_negative_infinity() {
    assert_output("programme test\ndébut\nafficher(7 / 2)\nfin test", "3");
    assert_output("programme test\ndébut\nafficher(-7 / 2)\nfin test", "-4");
    // Even real quotients are floored.
    assert_output("programme test\ndébut\nafficher(7.0 / 2.0)\nfin test", "3");
}

#[test]
fn division_by_zero_is_an_error() {
    assert_failure("programme test\ndébut\nafficher(1 / 0)\nfin test");
    assert_failure("programme test\ndébut\nafficher(1 mod 0)\nfin test");
}

#[test]
fn real_variables_always_show_a_decimal_point() {
    // The value is the integer 4, but the variable is declared réel.
    assert_output("programme test\ndébut\navec x: réel\nx <- 4\nafficher(x)\nfin test", "4.0");
    assert_output("programme test\ndébut\navec x: réel\nx <- 4.5\nafficher(x)\nfin test", "4.5");
    assert_output("programme test\ndébut\nafficher(4.0)\nfin test", "4.0");
}

#[test]
fn afficher_joins_arguments_with_one_space() {
    assert_output("programme test\ndébut\nafficher(1, 2, 3)\nfin test", "1 2 3");
    assert_output("programme test\ndébut\nafficher(\"x =\", 3)\nfin test", "x = 3");
}

#[test]
fn afficher_prints_booleans_in_french() {
    assert_output("programme test\ndébut\nafficher(vrai)\nfin test", "vrai");
    assert_output("programme test\ndébut\nafficher(1 < 2, 2 < 1)\nfin test", "vrai faux");
}

#[test]
fn afficher_works_without_parentheses() {
    assert_output("programme test\ndébut\navec x: entier\nx <- 5\nafficher x\nfin test", "5");
    assert_output("programme test\ndébut\nafficher \"salut\"\nfin test", "salut");
}

#[test]
fn string_escapes_and_concatenation() {
    assert_output("programme test\ndébut\nafficher(\"a\" + \"b\")\nfin test", "ab");
    assert_output("programme test\ndébut\nafficher(\"ligne\\n\")\nfin test", "ligne\n");
    assert_output("programme test\ndébut\nafficher(\"n = \" + 3)\nfin test", "n = 3");
}

#[test]
fn character_promotion() {
    // 'a' plus a number moves along the alphabet.
    assert_output("programme test\ndébut\nafficher('a' + 1)\nfin test", "b");
    assert_output("programme test\ndébut\nafficher('d' - 3)\nfin test", "a");
    // Two characters concatenate instead.
    assert_output("programme test\ndébut\nafficher('a' + 'b')\nfin test", "ab");
    // The promotion follows the static type of variables too.
    assert_output("programme test\ndébut\navec c: caractère\nc <- 'x'\nafficher(c + 1)\nfin test",
                  "y");
    assert_output("programme test\ndébut\nafficher('a' = 'a', 'a' < 'b')\nfin test", "vrai vrai");
    assert_output("programme test\ndébut\nafficher('a' < 98)\nfin test", "vrai");
}

#[test]
fn arithmetic_type_errors() {
    // Strings are rejected statically for the numbers-only operators.
    assert_failure("programme test\ndébut\nafficher(\"a\" * 2)\nfin test");
    assert_failure("programme test\ndébut\navec s: chaîne\ns <- \"a\"\nafficher(s - 1)\nfin test");
    // Booleans are rejected at runtime, `+` included.
    assert_failure("programme test\ndébut\nafficher(vrai + 1)\nfin test");
    assert_failure("programme test\ndébut\nafficher(vrai * 2)\nfin test");
}

#[test]
fn comparisons_bind_tighter_than_addition() {
    // The grammar puts comparisons at the term level, so this parses as
    // 1 + (2 = 3), which is a boolean operand error for `+`.
    assert_failure("programme test\ndébut\nafficher(1 + 2 = 3)\nfin test");
}

#[test]
fn if_else_branches() {
    let source = "programme test\ndébut\navec x: entier\nx <- 2\nsi x > 1 alors\nafficher(\"grand\")\nsinon\nafficher(\"petit\")\nfin si\nfin test";
    assert_output(source, "grand");

    let source = "programme test\ndébut\navec x: entier\nx <- 0\nsi x > 1 alors\nafficher(\"grand\")\nsinon\nafficher(\"petit\")\nfin si\nfin test";
    assert_output(source, "petit");

    // No sinon branch: a false condition is a no-op.
    let source = "programme test\ndébut\nsi 1 > 2 alors\nafficher(\"jamais\")\nfin si\nfin test";
    assert_output(source, "");
}

#[test]
fn while_loop() {
    let source = "programme test\ndébut\navec i: entier\ni <- 0\ntant que i < 3 faire\nafficher(i)\ni <- i + 1\nfin faire\nfin test";
    assert_output(source, "012");
}

#[test]
fn do_while_runs_at_least_once() {
    let source = "programme test\ndébut\navec i: entier\ni <- 5\nrépéter\nafficher(i)\ni <- i + 1\ntant que i < 3\nfin test";
    assert_output(source, "5");
}

#[test]
fn for_loop_ascending_and_descending() {
    let source = "programme test\ndébut\navec i: entier\npour i de 1 à 5 faire\nafficher(i)\nfin faire\nfin test";
    assert_output(source, "12345");

    let source = "programme test\ndébut\navec i: entier\npour i de 5 à 1 pas -1 faire\nafficher(i)\nfin faire\nfin test";
    assert_output(source, "54321");

    let source = "programme test\ndébut\navec i: entier\npour i de 0 à 10 pas 3 faire\nafficher(i)\nfin faire\nfin test";
    assert_output(source, "0369");

    // An ascending loop whose start is past the end never runs.
    let source = "programme test\ndébut\navec i: entier\npour i de 5 à 1 faire\nafficher(i)\nfin faire\nfin test";
    assert_output(source, "");
}

#[test]
fn for_loop_invalid_steps_fail_before_iterating() {
    let source = "programme test\ndébut\navec i: entier\npour i de 1 à 5 pas 0 faire\nafficher(i)\nfin faire\nfin test";
    match run(source) {
        Err(Error::Runtime(_)) => {},
        other => panic!("expected a runtime error, got {other:?}"),
    }

    let source = "programme test\ndébut\navec i: entier\npour i de 1 à 5 pas -1 faire\nafficher(i)\nfin faire\nfin test";
    assert_failure(source);
}

#[test]
fn for_loop_body_cannot_derail_the_counter() {
    // The counter is re-pinned before every statement of the body.
    let source = "programme test\ndébut\navec i: entier\npour i de 1 à 3 faire\ni <- 100\nafficher(i)\nfin faire\nfin test";
    assert_output(source, "123");
}

#[test]
fn for_loop_counter_must_be_an_integer() {
    let source = "programme test\ndébut\navec i: réel\npour i de 1 à 3 faire\nafficher(i)\nfin faire\nfin test";
    match run(source) {
        Err(Error::Semantic(_)) => {},
        other => panic!("expected a semantic error, got {other:?}"),
    }
}

#[test]
fn for_loop_literal_bounds_are_checked_at_parse_time() {
    let source = "programme test\ndébut\navec i: entier\npour i de vrai à 3 faire\nfin faire\nfin test";
    match run(source) {
        Err(Error::Syntax(_)) => {},
        other => panic!("expected a syntax error, got {other:?}"),
    }

    let source = "programme test\ndébut\navec i: entier\npour i de 1 à \"z\" faire\nfin faire\nfin test";
    match run(source) {
        Err(Error::Syntax(_)) => {},
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn functions_and_recursion() {
    let source = "programme test\ndébut\navec r: entier\nr <- factorielle(5)\nafficher(r)\nfin test\n\nfonction factorielle(n: entier) retourne entier\ndébut\nsi n <= 1 alors\nretourne 1\nfin si\nretourne n * factorielle(n - 1)\nfin factorielle";
    assert_output(source, "120");
}

#[test]
fn recursive_calls_get_independent_records() {
    // fibonacci exercises two live recursive frames at once; corrupted
    // records would produce a wrong sum.
    let source = "programme test\ndébut\nafficher(fib(10))\nfin test\n\nfonction fib(n: entier) retourne entier\ndébut\nsi n < 2 alors\nretourne n\nfin si\nretourne fib(n - 1) + fib(n - 2)\nfin fib";
    assert_output(source, "55");
}

#[test]
fn callables_resolve_regardless_of_order() {
    // The procedure calls a function that is declared after it.
    let source = "programme test\ndébut\np()\nfin test\n\nprocédure p()\ndébut\nafficher(carre(3))\nfin p\n\nfonction carre(n: entier) retourne entier\ndébut\nretourne n * n\nfin carre";
    assert_output(source, "9");
}

#[test]
fn copy_arguments_do_not_leak_writes() {
    let source = "programme test\ndébut\navec a: entier\na <- 1\np(a)\nafficher(a)\nfin test\n\nprocédure p(x: entier)\ndébut\nx <- 99\nfin p";
    assert_output(source, "1");
}

#[test]
fn reference_arguments_write_through_to_the_caller() {
    let source = "programme test\ndébut\navec a: entier\na <- 1\ndouble(; a)\nafficher(a)\nfin test\n\nprocédure double(; n: entier)\ndébut\nn <- n * 2\nfin double";
    assert_output(source, "2");
}

#[test]
fn reference_arguments_chain_through_nested_calls() {
    // `exterieur` passes its own reference argument by reference again;
    // the write must land in the program's variable.
    let source = "programme test\ndébut\navec a: entier\na <- 1\nexterieur(; a)\nafficher(a)\nfin test\n\nprocédure exterieur(; x: entier)\ndébut\ninterieur(; x)\nfin exterieur\n\nprocédure interieur(; y: entier)\ndébut\ny <- 42\nfin interieur";
    assert_output(source, "42");
}

#[test]
fn reference_arguments_can_be_pure_out_parameters() {
    // The caller's variable is never assigned before the call.
    let source = "programme test\ndébut\navec a: entier\ninitialise(; a)\nafficher(a)\nfin test\n\nprocédure initialise(; n: entier)\ndébut\nn <- 7\nfin initialise";
    assert_output(source, "7");
}

#[test]
fn reference_arguments_require_a_bare_variable() {
    let source = "programme test\ndébut\navec a: entier\na <- 1\np(1; 2 + 3)\nfin test\n\nprocédure p(x: entier; y: entier)\ndébut\nfin p";
    match run(source) {
        Err(Error::Semantic(_)) => {},
        other => panic!("expected a semantic error, got {other:?}"),
    }
}

#[test]
fn function_without_retourne_fails_at_the_call() {
    let source = "programme test\ndébut\navec x: entier\nx <- casse()\nfin test\n\nfonction casse() retourne entier\ndébut\navec y: entier\ny <- 1\nfin casse";
    match run(source) {
        Err(Error::Runtime(_)) => {},
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

#[test]
fn retourne_outside_a_function_is_fatal() {
    assert_failure("programme test\ndébut\nretourne 1\nfin test");
    // A retourne inside a procedure escapes it and is fatal too.
    let source = "programme test\ndébut\np()\nfin test\n\nprocédure p()\ndébut\nretourne 1\nfin p";
    assert_failure(source);
}

#[test]
fn saisir_reads_into_a_variable() {
    let source = "programme test\ndébut\navec x: entier\nsaisir(x)\nafficher(x + 1)\nfin test";
    assert_eq!(run_with_input(source, &["41"]).expect("runs"), "42");

    // Parenthesis-less form, into a never-assigned variable.
    let source = "programme test\ndébut\navec nom: chaîne\nsaisir nom\nafficher(\"salut \" + nom)\nfin test";
    assert_eq!(run_with_input(source, &["marie"]).expect("runs"), "salut marie");
}

#[test]
fn saisir_validates_against_the_declared_type() {
    let entier = "programme test\ndébut\navec x: entier\nsaisir(x)\nfin test";
    assert!(run_with_input(entier, &["abc"]).is_err());
    assert!(run_with_input(entier, &["4.5"]).is_err());
    assert!(run_with_input(entier, &["4"]).is_ok());

    // A réel requires a decimal point.
    let reel = "programme test\ndébut\navec x: réel\nsaisir(x)\nfin test";
    assert!(run_with_input(reel, &["4"]).is_err());
    assert!(run_with_input(reel, &["4.5"]).is_ok());

    let caractere = "programme test\ndébut\navec c: caractère\nsaisir(c)\nfin test";
    assert!(run_with_input(caractere, &["ab"]).is_err());
    assert!(run_with_input(caractere, &["a"]).is_ok());

    let booleen = "programme test\ndébut\navec b: booléen\nsaisir(b)\nfin test";
    assert!(run_with_input(booleen, &["oui"]).is_err());
    assert!(run_with_input(booleen, &["vrai"]).is_ok());
}

#[test]
fn saisir_writes_through_reference_arguments() {
    let source = "programme test\ndébut\navec x: entier\nlire(; x)\nafficher(x)\nfin test\n\nprocédure lire(; n: entier)\ndébut\nsaisir(n)\nfin lire";
    assert_eq!(run_with_input(source, &["13"]).expect("runs"), "13");
}

#[test]
fn saisir_rejects_expressions_statically() {
    let source = "programme test\ndébut\nsaisir(1 + 2)\nfin test";
    match run(source) {
        Err(Error::Semantic(_)) => {},
        other => panic!("expected a semantic error, got {other:?}"),
    }
}

#[test]
fn analysis_fully_precedes_execution() {
    // The program would print before hitting the undeclared variable,
    // but a failed analysis must leave no side effect at all.
    let source = "programme test\ndébut\nafficher(\"visible ?\")\ninconnu <- 1\nfin test";
    let mut console = TestConsole::default();
    assert!(frr::run_source(source, &mut console).is_err());
    assert!(console.output.is_empty(), "output leaked: {:?}", console.output);
}

#[test]
fn undeclared_and_redeclared_variables_are_rejected() {
    assert_failure("programme test\ndébut\nx <- 1\nfin test");
    assert_failure("programme test\ndébut\nafficher(x)\nfin test");
    // The second line extends the same avec block, redeclaring x.
    let source = "programme test\ndébut\navec x: entier\nx: réel\nfin test";
    match run(source) {
        Err(Error::Semantic(_)) => {},
        other => panic!("expected a semantic error, got {other:?}"),
    }
}

#[test]
fn reading_a_declared_but_unassigned_variable_fails() {
    let source = "programme test\ndébut\navec x: entier\nafficher(x)\nfin test";
    match run(source) {
        Err(Error::Runtime(_)) => {},
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

#[test]
fn unknown_callables_and_arity_mismatches_are_rejected() {
    assert_failure("programme test\ndébut\nmystere(1)\nfin test");

    let source = "programme test\ndébut\np(1, 2)\nfin test\n\nprocédure p(x: entier)\ndébut\nfin p";
    match run(source) {
        Err(Error::Semantic(_)) => {},
        other => panic!("expected a semantic error, got {other:?}"),
    }
}

#[test]
fn closing_labels_must_match() {
    assert_failure("programme test\ndébut\nfin autre");

    let source = "programme test\ndébut\nfin test\n\nprocédure p()\ndébut\nfin q";
    match run(source) {
        Err(Error::Syntax(_)) => {},
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn exactly_one_program_is_required() {
    // No program at all.
    let source = "procédure p()\ndébut\nfin p";
    assert_failure(source);

    // Two programs.
    let source = "programme a\ndébut\nfin a\n\nprogramme b\ndébut\nfin b";
    assert_failure(source);
}

#[test]
fn declarations_share_a_line_and_a_type() {
    let source = "programme test\ndébut\navec a, b: entier\na <- 1\nb <- 2\nafficher(a + b)\nfin test";
    assert_output(source, "3");
}

#[test]
fn declaration_block_backtracks_into_statements() {
    // The line after the declarations starts with an identifier and could
    // open another declaration; the parser must rewind and read it as an
    // assignment.
    let source = "programme test\ndébut\navec x: entier\navec\ny: entier\nx <- 1\ny <- 2\nafficher(x + y)\nfin test";
    assert_failure(source); // two avec blocks: the second is not a declaration block

    let source = "programme test\ndébut\navec\nx: entier\ny: réel\nx <- 2\ny <- 1.5\nafficher(x, y)\nfin test";
    assert_output(source, "2 1.5");
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let source = "# en-tête\n\nprogramme test\ndébut\n# commentaire\n\navec x: entier\nx <- 1 # fin de ligne\nafficher(x)\nfin test";
    assert_output(source, "1");
}

#[test]
fn invalid_characters_are_lexical_errors() {
    let source = "programme test\ndébut\navec x: entier\nx <- 1 @ 2\nfin test";
    match run(source) {
        Err(Error::Lexical(_)) => {},
        other => panic!("expected a lexical error, got {other:?}"),
    }
}

#[test]
fn scripts_corpus_runs_clean() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| {
                                                  e.path()
                                                   .extension()
                                                   .is_some_and(|ext| ext == "fr")
                                              })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run(&source) {
            panic!("Script {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn factorielle_script_output() {
    let source = fs::read_to_string("tests/scripts/factorielle.fr").expect("missing file");
    assert_eq!(run(&source).expect("runs"), "factorielle(6) = 720");
}
