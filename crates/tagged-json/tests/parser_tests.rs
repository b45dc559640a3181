use tagged_json::{parse, ErrorKind, Kind, Value};

fn assert_error(input: &str, kind: ErrorKind) {
    match parse(input) {
        Ok(value) => panic!("expected {kind:?} for {input:?}, parsed {value:?}"),
        Err(err) => assert_eq!(err.kind(), kind, "input: {input:?}, error: {err}"),
    }
}

/// Helper: the parse must agree with serde_json on well-formed input.
fn assert_matches_serde_json(input: &str) {
    let ours = parse(input).unwrap();
    let theirs: Value = serde_json::from_str(input).unwrap();
    assert_eq!(ours, theirs, "input: {input}");
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn parse_null() {
    assert!(parse("null").unwrap().is_null());
}

#[test]
fn parse_true_and_false() {
    assert_eq!(parse("true").unwrap(), Value::Bool(true));
    assert_eq!(parse("false").unwrap(), Value::Bool(false));
}

#[test]
fn parse_surrounding_whitespace() {
    assert_eq!(parse(" \t\r\n true \n").unwrap(), Value::Bool(true));
}

#[test]
fn truncated_literal_is_syntax_error() {
    assert_error("tru", ErrorKind::Syntax);
    assert_error("nul", ErrorKind::Syntax);
    assert_error("fals", ErrorKind::Syntax);
}

#[test]
fn misspelled_literal_is_syntax_error() {
    assert_error("nulL", ErrorKind::Syntax);
    assert_error("trUe", ErrorKind::Syntax);
}

#[test]
fn unexpected_character() {
    assert_error("?", ErrorKind::Syntax);
    assert_error("]", ErrorKind::Syntax);
    assert_error("+1", ErrorKind::Syntax);
    assert_error("'a'", ErrorKind::Syntax);
}

#[test]
fn empty_input_is_unexpected_end() {
    assert_error("", ErrorKind::UnexpectedEnd);
    assert_error("   \n\t", ErrorKind::UnexpectedEnd);
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn parse_integers() {
    assert_eq!(parse("0").unwrap(), Value::Int(0));
    assert_eq!(parse("42").unwrap(), Value::Int(42));
    assert_eq!(parse("-7").unwrap(), Value::Int(-7));
    assert_eq!(parse("-0").unwrap(), Value::Int(0));
}

#[test]
fn parse_i64_bounds() {
    assert_eq!(parse("9223372036854775807").unwrap(), Value::Int(i64::MAX));
    assert_eq!(parse("-9223372036854775808").unwrap(), Value::Int(i64::MIN));
    assert_error("9223372036854775808", ErrorKind::Syntax);
}

#[test]
fn fraction_or_exponent_makes_double() {
    assert_eq!(parse("3.14").unwrap(), Value::Double(3.14));
    assert_eq!(parse("-0.5").unwrap(), Value::Double(-0.5));
    assert_eq!(parse("1e3").unwrap(), Value::Double(1000.0));
    assert_eq!(parse("1E-2").unwrap(), Value::Double(0.01));
    assert_eq!(parse("2.5e+1").unwrap(), Value::Double(25.0));
    assert_eq!(parse("1.0").unwrap().kind(), Kind::Double);
}

#[test]
fn missing_fraction_digits() {
    assert_error("[1.]", ErrorKind::Syntax);
    assert_error("1.", ErrorKind::UnexpectedEnd);
}

#[test]
fn missing_exponent_digits() {
    assert_error("[1e]", ErrorKind::Syntax);
    assert_error("[1e+]", ErrorKind::Syntax);
    assert_error("1e", ErrorKind::UnexpectedEnd);
}

#[test]
fn minus_without_digits() {
    assert_error("[-]", ErrorKind::Syntax);
    assert_error("-", ErrorKind::UnexpectedEnd);
    assert_error("-a", ErrorKind::Syntax);
}

#[test]
fn leading_zero_inside_array_is_rejected() {
    assert_error("[01]", ErrorKind::Syntax);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn parse_plain_string() {
    assert_eq!(parse(r#""hello world""#).unwrap(), Value::from("hello world"));
    assert_eq!(parse(r#""""#).unwrap(), Value::from(""));
}

#[test]
fn string_whitespace_is_kept_verbatim() {
    assert_eq!(parse(r#""  a  b  ""#).unwrap(), Value::from("  a  b  "));
}

#[test]
fn parse_simple_escapes() {
    let value = parse(r#""q\" b\\ s\/ \b\f\n\r\t""#).unwrap();
    assert_eq!(value, Value::from("q\" b\\ s/ \u{8}\u{c}\n\r\t"));
}

#[test]
fn unicode_escape_is_skipped_not_decoded() {
    assert_eq!(parse(r#""a\u0041b""#).unwrap(), Value::from("ab"));
    assert_eq!(parse(r#""\u00e9""#).unwrap(), Value::from(""));
    assert_eq!(parse(r#"["\u00e9x",1]"#).unwrap()[0], Value::from("x"));
}

#[test]
fn non_ascii_text_passes_through() {
    assert_eq!(parse("\"caf\u{e9} \u{4f60}\u{597d}\"").unwrap(), Value::from("café 你好"));
}

#[test]
fn invalid_escape_is_syntax_error() {
    assert_error(r#""\x""#, ErrorKind::Syntax);
    assert_error(r#""\a""#, ErrorKind::Syntax);
}

#[test]
fn unterminated_string_is_unexpected_end() {
    assert_error(r#""abc"#, ErrorKind::UnexpectedEnd);
    assert_error(r#""abc\"#, ErrorKind::UnexpectedEnd);
    assert_error(r#"["abc"#, ErrorKind::UnexpectedEnd);
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn parse_flat_array() {
    let value = parse("[1,2,3]").unwrap();
    assert_eq!(
        value,
        Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn parse_empty_array() {
    assert_eq!(parse("[]").unwrap(), Value::Array(vec![]));
    assert_eq!(parse("[ \n ]").unwrap(), Value::Array(vec![]));
}

#[test]
fn parse_mixed_array_with_whitespace() {
    let value = parse(r#"[ 1 , "two" , [ true ] , { } , null ]"#).unwrap();
    assert_eq!(value.size().unwrap(), 5);
    assert_eq!(value[1], Value::from("two"));
    assert_eq!(value[2], Value::Array(vec![Value::Bool(true)]));
    assert!(value[3].is_object());
    assert!(value[4].is_null());
}

#[test]
fn trailing_comma_at_end_of_input() {
    assert_error("[1,2,", ErrorKind::UnexpectedEnd);
}

#[test]
fn trailing_comma_before_bracket() {
    assert_error("[1,2,]", ErrorKind::Syntax);
}

#[test]
fn missing_separator_in_array() {
    assert_error("[1 2]", ErrorKind::Syntax);
    assert_error("[1;2]", ErrorKind::Syntax);
}

#[test]
fn unclosed_array() {
    assert_error("[", ErrorKind::UnexpectedEnd);
    assert_error("[1", ErrorKind::UnexpectedEnd);
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn parse_flat_object() {
    let value = parse(r#"{"a":1,"b":2}"#).unwrap();
    assert_eq!(value.size().unwrap(), 2);
    assert_eq!(value["a"], Value::Int(1));
    assert_eq!(value["b"], Value::Int(2));
}

#[test]
fn parse_empty_object() {
    assert_eq!(parse("{}").unwrap(), Value::with_kind(Kind::Object));
    assert_eq!(parse("{\n}").unwrap(), Value::with_kind(Kind::Object));
}

#[test]
fn parse_nested_object() {
    let value = parse(r#"{"outer": {"inner": [1, {"deep": null}]}}"#).unwrap();
    assert!(value["outer"]["inner"][1]["deep"].is_null());
    assert!(value["outer"]["inner"][1].has_key("deep").unwrap());
}

#[test]
fn duplicate_key_keeps_last_value() {
    let value = parse(r#"{"a":1,"a":2}"#).unwrap();
    assert_eq!(value.size().unwrap(), 1);
    assert_eq!(value["a"], Value::Int(2));
}

#[test]
fn escaped_key_is_unescaped() {
    let value = parse(r#"{"a\"b":1}"#).unwrap();
    assert!(value.has_key("a\"b").unwrap());
}

#[test]
fn non_string_key_is_syntax_error() {
    assert_error("{a:1}", ErrorKind::Syntax);
    assert_error("{1:1}", ErrorKind::Syntax);
}

#[test]
fn missing_colon_is_syntax_error() {
    assert_error(r#"{"a" 1}"#, ErrorKind::Syntax);
    assert_error(r#"{"a",1}"#, ErrorKind::Syntax);
}

#[test]
fn bad_object_separator_is_syntax_error() {
    assert_error(r#"{"a":1;"b":2}"#, ErrorKind::Syntax);
    assert_error(r#"{"a":1,}"#, ErrorKind::Syntax);
}

#[test]
fn truncated_object_is_unexpected_end() {
    assert_error("{", ErrorKind::UnexpectedEnd);
    assert_error(r#"{"a""#, ErrorKind::UnexpectedEnd);
    assert_error(r#"{"a":"#, ErrorKind::UnexpectedEnd);
    assert_error(r#"{"a":1"#, ErrorKind::UnexpectedEnd);
    assert_error(r#"{"a":1,"#, ErrorKind::UnexpectedEnd);
}

// ============================================================================
// Agreement with serde_json
// ============================================================================

#[test]
fn agrees_with_serde_json_on_documents() {
    for input in [
        "null",
        "[1,2,3]",
        r#"{"name":"Alice","age":30,"tags":["a","b"],"ok":true}"#,
        r#"{"nested":{"list":[{"x":-1},{"y":2.5}],"empty":{}}}"#,
        r#"[[], [[]], {"": ""}]"#,
        r#"{"esc":"line\nbreak\ttab \"quoted\" back\\slash"}"#,
    ] {
        assert_matches_serde_json(input);
    }
}

// ============================================================================
// Nesting depth
// ============================================================================

#[test]
fn deep_nesting_parses_on_a_large_stack() {
    let depth = 10_000;
    let levels = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(move || {
            let json = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
            let value = parse(&json).unwrap();
            let mut node = &value;
            let mut levels = 0;
            while let Value::Array(items) = node {
                levels += 1;
                match items.first() {
                    Some(next) => node = next,
                    None => break,
                }
            }
            levels
        })
        .unwrap()
        .join()
        .unwrap();
    assert_eq!(levels, depth);
}
