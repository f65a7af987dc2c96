//! Negative test coverage for the WebIDL parser
//!
//! A syntax error aborts the whole parse; these tests pin the message, line
//! and context reported for common mistakes.

use idlfix_core::{Dialect, ParseError, parse, parse_with};

fn parse_error(source: &str) -> ParseError {
    match parse(source, "Broken.webidl") {
        Ok(root) => panic!("expected an error, parsed {} definitions", root.definitions.len()),
        Err(err) => err,
    }
}

#[test]
fn test_member_without_parentheses() {
    let err = parse_error("interface A {\n  bogus;\n};");
    assert_eq!(err.message, "Invalid operation");
    assert_eq!(err.line, 2);
    assert_eq!(err.source_name, "Broken.webidl");
}

#[test]
fn test_missing_semicolon_after_interface() {
    let err = parse_error("interface A {\n}\ninterface B {};");
    assert_eq!(err.message, "Missing semicolon after interface");
    assert_eq!(err.line, 3);
}

#[test]
fn test_error_context_quotes_previous_tokens() {
    let err = parse_error("interface A {\n  attribute long;\n};");
    assert_eq!(err.message, "Attribute lacks a name");
    assert_eq!(err.context, "  attribute long");
    assert!(err.to_string().starts_with("Syntax error at line 2 in Broken.webidl"));
}

#[test]
fn test_stray_extended_attributes() {
    let err = parse_error("interface A {};\n[Exposed=Window]\n");
    assert_eq!(err.message, "Stray extended attributes");
}

#[test]
fn test_unrecognised_tokens() {
    let err = parse_error("interface A {};\n}");
    assert_eq!(err.message, "Unrecognised tokens");
}

#[test]
fn test_bodyless_interface_needs_name_and_semicolon() {
    assert_eq!(parse_error("interface Foo").message, "Bodyless interface");
    assert_eq!(parse_error("interface Foo : Bar;").message, "Bodyless interface");
    assert_eq!(parse_error("interface ;").message, "Missing name in interface");
}

#[test]
fn test_other_containers_have_no_bodyless_form() {
    assert_eq!(parse_error("dictionary D;").message, "Bodyless dictionary");
    assert_eq!(parse_error("namespace N;").message, "Bodyless namespace");
    assert_eq!(parse_error("interface mixin M;").message, "Bodyless interface mixin");
    assert_eq!(parse_error("partial interface P;").message, "Bodyless interface");
}

#[test]
fn test_callback_constructor_errors() {
    assert_eq!(
        parse_error("callback constructor = Foo ();").message,
        "Callback lacks a name"
    );
    assert_eq!(
        parse_error("callback constructor C = ;").message,
        "Callback constructor lacks a return type"
    );
    assert_eq!(
        parse_error("callback constructor C = Foo;").message,
        "Callback constructor lacks parentheses for arguments"
    );
    assert_eq!(
        parse_error("callback constructor C = Foo (long a;").message,
        "Unterminated callback constructor"
    );
}

#[test]
fn test_legacycaller_requires_arguments() {
    let err = parse_error("interface A {\n  legacycaller any;\n};");
    assert_eq!(err.message, "Invalid operation");
}

#[test]
fn test_utf8string_record_errors() {
    assert_eq!(
        parse_error("dictionary D { record<UTF8String long> r; };").message,
        "Missing comma after record key type"
    );
    assert_eq!(
        parse_error("dictionary D { required record<UTF8String, long> r = {}; };").message,
        "Required member must not have a default"
    );
    assert_eq!(
        parse_error("typedef record<UTF8String, long>;").message,
        "Typedef lacks a name"
    );
}

#[test]
fn test_enum_errors() {
    assert_eq!(parse_error("enum E { };").message, "No value in enum");
    assert_eq!(parse_error("enum E { \"a\" \"b\" };").message, "No comma between enum values");
    assert_eq!(parse_error("enum E { \"a\" }").message, "No semicolon after enum");
}

#[test]
fn test_void_is_not_an_argument_type() {
    let err = parse_error("interface A { undefined f(void x); };");
    assert_eq!(err.message, "Unterminated operation");
}

#[test]
fn test_servo_has_no_gecko_extensions() {
    let err = parse_with(
        "callback constructor C = Foo ();",
        "C.webidl",
        Dialect::Servo,
    )
    .unwrap_err();
    assert_eq!(err.message, "Callback lacks a name");

    let err = parse_with(
        "namespace N { attribute long x; };",
        "N.webidl",
        Dialect::Servo,
    )
    .unwrap_err();
    assert_eq!(err.message, "Attributes must be readonly in this context");
}
