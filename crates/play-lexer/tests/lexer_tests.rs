//! Lexer tests.
//!
//! Covers: token classification, keyword and literal re-tagging, greedy
//! operators, comments, lookahead, token text reconstruction, error
//! recovery, and the 100-iteration determinism test.

use play_lexer::{tokenize, Token, TokenKind, Tokenizer};
use play_types::{ErrorCode, SourceFile};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn lex(source: &str) -> play_lexer::LexResult {
    let sf = SourceFile::new("test.play", source);
    tokenize(&sf)
}

/// Token kinds, excluding the final Eof.
fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .tokens
        .into_iter()
        .filter(|t| !t.is_eof())
        .map(|t| t.kind)
        .collect()
}

/// Token texts, excluding the final Eof.
fn texts(source: &str) -> Vec<String> {
    lex(source)
        .tokens
        .into_iter()
        .filter(|t| !t.is_eof())
        .map(|t| t.text)
        .collect()
}

fn error_codes(source: &str) -> Vec<ErrorCode> {
    lex(source).diagnostics.codes()
}

fn first_error(source: &str) -> String {
    lex(source)
        .diagnostics
        .errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_default()
}

/// Concatenate each token's source text (strings keep their quotes).
fn rejoin(source: &str) -> String {
    lex(source)
        .tokens
        .iter()
        .map(|t| &source[t.pos.begin..t.pos.end])
        .collect()
}

// ─────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_keywords() {
    assert_eq!(kinds("function let"), vec![TokenKind::Keyword, TokenKind::Keyword]);
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(
        kinds("functions letter let_"),
        vec![TokenKind::Identifier; 3]
    );
}

#[test]
fn test_identifiers_with_digits_and_underscores() {
    assert_eq!(texts("a1 snake_case x_2"), vec!["a1", "snake_case", "x_2"]);
    assert_eq!(kinds("a1 snake_case x_2"), vec![TokenKind::Identifier; 3]);
}

#[test]
fn test_boolean_and_null_literals() {
    assert_eq!(
        kinds("true false null"),
        vec![
            TokenKind::BooleanLiteral,
            TokenKind::BooleanLiteral,
            TokenKind::NullLiteral
        ]
    );
}

#[test]
fn test_integer_literal() {
    let tokens = lex("42").tokens;
    assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[0].text, "42");
}

#[test]
fn test_decimal_literal() {
    let tokens = lex("3.14").tokens;
    assert_eq!(tokens[0].kind, TokenKind::DecimalLiteral);
    assert_eq!(tokens[0].text, "3.14");
}

#[test]
fn test_dot_without_digit_is_not_part_of_number() {
    // The `.` itself is not a PlayScript character.
    let result = lex("3.");
    assert_eq!(result.tokens[0].kind, TokenKind::IntegerLiteral);
    assert_eq!(result.tokens[0].text, "3");
    assert_eq!(result.diagnostics.codes(), vec![ErrorCode::UNEXPECTED_CHARACTER]);
}

#[test]
fn test_string_literal_text_excludes_quotes() {
    let tokens = lex(r#""hello world""#).tokens;
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].text, "hello world");
    assert_eq!(tokens[0].pos.begin, 0);
    assert_eq!(tokens[0].pos.end, 13);
}

#[test]
fn test_string_has_no_escapes() {
    assert_eq!(texts(r#""a\n""#), vec![r"a\n"]);
}

#[test]
fn test_empty_string() {
    assert_eq!(texts(r#""""#), vec![""]);
}

#[test]
fn test_separators() {
    assert_eq!(kinds("( ) { } ; , :"), vec![TokenKind::Separator; 7]);
    assert_eq!(texts("(){};,:"), vec!["(", ")", "{", "}", ";", ",", ":"]);
}

// ─────────────────────────────────────────────────────────────────────
// Operators
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_single_operators() {
    assert_eq!(
        texts("+ - * / % = ! < >"),
        vec!["+", "-", "*", "/", "%", "=", "!", "<", ">"]
    );
}

#[test]
fn test_two_character_operators() {
    let ops = "++ += -- -= *= /= %= == != <= >= && ||";
    assert_eq!(texts(ops), ops.split(' ').collect::<Vec<_>>());
    assert!(kinds(ops).iter().all(|k| *k == TokenKind::Operator));
}

#[test]
fn test_operators_are_greedy() {
    assert_eq!(texts("a+++b"), vec!["a", "++", "+", "b"]);
    assert_eq!(texts("x==y"), vec!["x", "==", "y"]);
    assert_eq!(texts("x=-1"), vec!["x", "=", "-", "1"]);
}

#[test]
fn test_lone_ampersand_and_pipe_are_unexpected() {
    assert_eq!(
        error_codes("a & b | c"),
        vec![ErrorCode::UNEXPECTED_CHARACTER, ErrorCode::UNEXPECTED_CHARACTER]
    );
    assert_eq!(texts("a & b"), vec!["a", "b"]);
}

// ─────────────────────────────────────────────────────────────────────
// Comments and whitespace
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_line_comment_skipped() {
    assert_eq!(texts("a // comment\nb"), vec!["a", "b"]);
}

#[test]
fn test_line_comment_at_end_of_input() {
    assert_eq!(texts("a // trailing"), vec!["a"]);
}

#[test]
fn test_block_comment_skipped() {
    assert_eq!(texts("a /* one\ntwo */ b"), vec!["a", "b"]);
}

#[test]
fn test_block_comment_with_stars() {
    assert_eq!(texts("a /** x **/ b"), vec!["a", "b"]);
}

#[test]
fn test_division_is_not_a_comment() {
    assert_eq!(texts("a / b /= c"), vec!["a", "/", "b", "/=", "c"]);
}

#[test]
fn test_comment_transparency() {
    let with = lex("/* comment */ function f(){} f();").tokens;
    let without = lex("function f(){} f();").tokens;
    let strip = |tokens: Vec<Token>| -> Vec<(TokenKind, String)> {
        tokens.into_iter().map(|t| (t.kind, t.text)).collect()
    };
    assert_eq!(strip(with), strip(without));
}

#[test]
fn test_carriage_returns_are_whitespace() {
    assert_eq!(texts("let\r\nx"), vec!["let", "x"]);
    assert!(error_codes("let\r\nx").is_empty());
}

#[test]
fn test_positions_track_lines() {
    let tokens = lex("let x\n  = 1;").tokens;
    let eq = &tokens[2];
    assert_eq!(eq.text, "=");
    assert_eq!((eq.pos.line, eq.pos.col), (2, 3));
}

#[test]
fn test_end_column_counts_characters() {
    let tokens = lex("let s = \"日本\"; s;").tokens;
    let string = &tokens[3];
    assert_eq!(string.kind, TokenKind::StringLiteral);
    assert_eq!((string.pos.col, string.pos.end_col), (9, 12));
    assert_eq!(string.pos.end - string.pos.begin, 8);
    let semi = &tokens[4];
    assert_eq!((semi.pos.col, semi.pos.end_col), (13, 13));
}

#[test]
fn test_multiline_string_ends_on_later_line() {
    let tokens = lex("\"a\nbc\"").tokens;
    let span = tokens[0].pos.span();
    assert_eq!((span.start_line, span.start_col), (1, 1));
    assert_eq!((span.end_line, span.end_col), (2, 3));
}

// ─────────────────────────────────────────────────────────────────────
// Reconstruction
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_token_texts_reproduce_meaningful_content() {
    let source = "function greet(name: string) {\n  println(\"hi\" + name);\n}\n// call\ngreet(\"bob\");";
    let meaningful: String = "function greet(name: string) {\n  println(\"hi\" + name);\n}\ngreet(\"bob\");"
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    // Whitespace inside string literals is kept, none appears here.
    assert_eq!(rejoin(source), meaningful);
}

// ─────────────────────────────────────────────────────────────────────
// Lookahead and EOF
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_peek_then_next_returns_same_token() {
    let sf = SourceFile::new("test.play", "let x");
    let mut tokenizer = Tokenizer::new(&sf);
    let peeked = tokenizer.peek().clone();
    assert_eq!(tokenizer.peek(), &peeked);
    assert_eq!(tokenizer.next(), peeked);
    assert_eq!(tokenizer.next().text, "x");
}

#[test]
fn test_eof_is_repeated() {
    let sf = SourceFile::new("test.play", "a");
    let mut tokenizer = Tokenizer::new(&sf);
    tokenizer.next();
    for _ in 0..3 {
        assert!(tokenizer.next().is_eof());
    }
    assert!(tokenizer.peek().is_eof());
}

#[test]
fn test_token_stream_ends_with_single_eof() {
    for source in ["", "   ", "let x = 1;", "/* open"] {
        let tokens = lex(source).tokens;
        assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1, "{source:?}");
        assert!(tokens.last().is_some_and(Token::is_eof));
    }
}

// ─────────────────────────────────────────────────────────────────────
// Error recovery
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_unexpected_character_skipped() {
    let result = lex("let # x");
    assert_eq!(result.diagnostics.codes(), vec![ErrorCode::UNEXPECTED_CHARACTER]);
    let texts: Vec<_> = result.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["let", "x", ""]);
}

#[test]
fn test_unexpected_character_message_names_char_and_position() {
    assert_eq!(first_error("a\n  @"), "unexpected character '@' at 2:3");
}

#[test]
fn test_unterminated_string_returns_partial_text() {
    let result = lex("\"abc");
    assert_eq!(result.diagnostics.codes(), vec![ErrorCode::UNTERMINATED_STRING]);
    assert_eq!(result.tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(result.tokens[0].text, "abc");
    assert!(result.tokens[1].is_eof());
}

#[test]
fn test_unterminated_block_comment() {
    let result = lex("a /* never closed");
    assert_eq!(result.diagnostics.codes(), vec![ErrorCode::UNTERMINATED_COMMENT]);
    assert_eq!(result.tokens.len(), 2);
    assert!(first_error("a /* never closed").contains("1:3"));
}

#[test]
fn test_multiple_errors_collected() {
    assert_eq!(error_codes("# $ `").len(), 3);
}

#[test]
fn test_diagnostic_carries_source_line() {
    let result = lex("ok\nbad ?");
    let error = &result.diagnostics.errors[0];
    assert_eq!(error.source_line, "bad ?");
    assert_eq!(error.file, "test.play");
}

// ─────────────────────────────────────────────────────────────────────
// 100-iteration determinism test
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_lexer_determinism_100_iterations() {
    let source = r#"
function fib(n: integer): integer {
  n * 2 + 1;
}
/* block */
let greeting: string = "hello";
let ratio = 0.75;
println(greeting); // done
fib(10) >= 3 && true || null != false;
"#;
    let baseline: Vec<_> = lex(source)
        .tokens
        .into_iter()
        .map(|t| (t.kind, t.text, t.pos))
        .collect();
    for i in 0..100 {
        let run: Vec<_> = lex(source)
            .tokens
            .into_iter()
            .map(|t| (t.kind, t.text, t.pos))
            .collect();
        assert_eq!(baseline, run, "iteration {i} differs");
    }
}
