use super::*;

macro_rules! case {
    ($method:ident($source:expr $(, $arg:expr)*) => Err($err:expr)) => {
        let mut parser = Parser::new($source, false);
        assert_eq!(parser.$method($($arg),*).unwrap_err(), $err);
    };
    ($method:ident($source:expr $(, $arg:expr)*) => $ast:expr) => {
        let mut parser = Parser::new($source, false);
        assert_eq!(parser.$method($($arg),*).unwrap(), $ast);
    };
}

fn pos(offset: usize) -> Position {
    Position {
        offset,
        line: 1,
        column: offset + 1,
    }
}

fn name(name: &str) -> ast::OptionName {
    ast::OptionName {
        parts: vec![ast::OptionNamePart::Ident(name.to_owned())],
    }
}

fn unexpected(expected: &str, found: &str, span: Span) -> ParseErrorKind {
    ParseErrorKind::UnexpectedToken {
        expected: expected.to_owned(),
        found: found.to_owned(),
        span,
    }
}

fn empty_message(position: Position, name: &str) -> ast::Message {
    ast::Message {
        position,
        name: name.to_owned(),
        enums: vec![],
        messages: vec![],
        map_fields: vec![],
        options: vec![],
        oneofs: vec![],
        reserved: vec![],
        fields: vec![],
        extends: vec![],
    }
}

const SEMI: &[Token<'static>] = &[Token::Semicolon];

#[test]
fn parse_option() {
    case!(parse_option("option foo = 5;") => ast::Option {
        position: pos(0),
        body: ast::ValueOption {
            position: pos(7),
            name: name("foo"),
            value: ast::Constant::Int(5),
        },
    });
    case!(parse_option("option (foo.bar) = \"hello\";") => ast::Option {
        position: pos(0),
        body: ast::ValueOption {
            position: pos(7),
            name: ast::OptionName {
                parts: vec![ast::OptionNamePart::Extension(ast::TypeName::from("foo.bar"))],
            },
            value: ast::Constant::String("hello".to_owned()),
        },
    });
    case!(parse_option("option (foo).bar = true;") => ast::Option {
        position: pos(0),
        body: ast::ValueOption {
            position: pos(7),
            name: ast::OptionName {
                parts: vec![
                    ast::OptionNamePart::Extension(ast::TypeName::from("foo")),
                    ast::OptionNamePart::Ident("bar".to_owned()),
                ],
            },
            value: ast::Constant::Bool(true),
        },
    });
    case!(parse_option("option foo.(bar.baz).quz = -inf;") => ast::Option {
        position: pos(0),
        body: ast::ValueOption {
            position: pos(7),
            name: ast::OptionName {
                parts: vec![
                    ast::OptionNamePart::Ident("foo".to_owned()),
                    ast::OptionNamePart::Extension(ast::TypeName::from("bar.baz")),
                    ast::OptionNamePart::Ident("quz".to_owned()),
                ],
            },
            value: ast::Constant::Negated(Box::new(ast::Constant::Reference("inf".into()))),
        },
    });
    case!(parse_option("option (.foo.bar) = 1.5;") => ast::Option {
        position: pos(0),
        body: ast::ValueOption {
            position: pos(7),
            name: ast::OptionName {
                parts: vec![ast::OptionNamePart::Extension(ast::TypeName::from(".foo.bar"))],
            },
            value: ast::Constant::Float(1.5),
        },
    });
    case!(parse_option("option ;") => Err(unexpected("an identifier or '('", ";", 7..8)));
    case!(parse_option("option foo (") => Err(unexpected("'.' or '='", "(", 11..12)));
    case!(parse_option("option foo.]") => Err(unexpected("an identifier or '('", "]", 11..12)));
    case!(parse_option("option foo = =") => Err(unexpected("a constant", "=", 13..14)));
    case!(parse_option("option foo = 1 )") => Err(unexpected("';'", ")", 15..16)));
    case!(parse_option("option foo = a.b )") => Err(unexpected("'.' or ';'", ")", 17..18)));
    case!(parse_option("option foo = 1") => Err(ParseErrorKind::UnexpectedEof {
        expected: "';'".to_owned(),
        span: 14..14,
    }));
}

#[test]
fn parse_options_list() {
    case!(parse_options_list("[a = 1, (b).c = 'd']") => vec![
        ast::ValueOption {
            position: pos(1),
            name: name("a"),
            value: ast::Constant::Int(1),
        },
        ast::ValueOption {
            position: pos(8),
            name: ast::OptionName {
                parts: vec![
                    ast::OptionNamePart::Extension(ast::TypeName::from("b")),
                    ast::OptionNamePart::Ident("c".to_owned()),
                ],
            },
            value: ast::Constant::String("d".to_owned()),
        },
    ]);
    case!(parse_options_list("[a = b.c]") => vec![ast::ValueOption {
        position: pos(1),
        name: name("a"),
        value: ast::Constant::Reference("b.c".into()),
    }]);
    case!(parse_options_list("[a = b c]") => Err(unexpected("'.', ',' or ']'", "c", 7..8)));
    case!(parse_options_list("[a = 1;") => Err(unexpected("',' or ']'", ";", 6..7)));
    case!(parse_options_list("[]") => Err(unexpected("an identifier or '('", "]", 1..2)));
}

#[test]
fn parse_constant() {
    case!(parse_constant("-5", SEMI) => ast::Constant::Negated(Box::new(ast::Constant::Int(5))));
    case!(parse_constant("-0.5", SEMI) => ast::Constant::Negated(Box::new(ast::Constant::Float(0.5))));
    case!(parse_constant("-inf;", SEMI) => ast::Constant::Negated(Box::new(
        ast::Constant::Reference("inf".into())
    )));
    case!(parse_constant("+1.5", SEMI) => ast::Constant::Float(1.5));
    case!(parse_constant("0x10", SEMI) => ast::Constant::Int(16));
    case!(parse_constant("18446744073709551615", SEMI) => ast::Constant::Int(u64::MAX));
    case!(parse_constant("-18446744073709551615", SEMI) => ast::Constant::Negated(Box::new(
        ast::Constant::Int(u64::MAX)
    )));
    case!(parse_constant("true", SEMI) => ast::Constant::Bool(true));
    case!(parse_constant("false", SEMI) => ast::Constant::Bool(false));
    case!(parse_constant("trueish;", SEMI) => ast::Constant::Reference("trueish".into()));
    case!(parse_constant("foo.bar;", SEMI) => ast::Constant::Reference("foo.bar".into()));
    case!(parse_constant("'a' \"b\"", SEMI) => ast::Constant::String("ab".to_owned()));
    case!(parse_constant("- -5", SEMI) => Err(unexpected("a numeric literal or identifier", "-", 2..3)));
    case!(parse_constant("-\"a\"", SEMI) => Err(unexpected("a numeric literal or identifier", "\"a\"", 1..4)));
    case!(parse_constant("-true", SEMI) => Err(unexpected("a numeric literal or identifier", "true", 1..5)));
    case!(parse_constant("+foo", SEMI) => Err(unexpected("a numeric literal", "foo", 1..4)));
    case!(parse_constant("\"\\xff\"", SEMI) => Err(ParseErrorKind::InvalidUtf8String { span: 0..6 }));
    case!(parse_constant("foo", SEMI) => Err(ParseErrorKind::UnexpectedEof {
        expected: "'.' or ';'".to_owned(),
        span: 3..3,
    }));
}

#[test]
fn parse_enum() {
    case!(parse_enum(
        "enum Foo { BAR = 1; BAZ = -2 [deprecated = true]; option allow_alias = true; \
        reserved -10 to -8, 3, 5 to max; reserved \"QUX\"; ; }"
    ) => ast::Enum {
        position: pos(0),
        name: "Foo".to_owned(),
        options: vec![ast::Option {
            position: pos(50),
            body: ast::ValueOption {
                position: pos(57),
                name: name("allow_alias"),
                value: ast::Constant::Bool(true),
            },
        }],
        fields: vec![
            ast::EnumField {
                position: pos(11),
                name: "BAR".to_owned(),
                value: 1,
                options: vec![],
            },
            ast::EnumField {
                position: pos(20),
                name: "BAZ".to_owned(),
                value: -2,
                options: vec![ast::ValueOption {
                    position: pos(30),
                    name: name("deprecated"),
                    value: ast::Constant::Bool(true),
                }],
            },
        ],
        reserved: vec![
            ast::Reserved {
                position: pos(77),
                names: vec![],
                ranges: vec![
                    ast::Range { from: -10, to: ast::RangeEnd::Int(-8) },
                    ast::Range { from: 3, to: ast::RangeEnd::None },
                    ast::Range { from: 5, to: ast::RangeEnd::Max },
                ],
            },
            ast::Reserved {
                position: pos(110),
                names: vec!["QUX".to_owned()],
                ranges: vec![],
            },
        ],
    });
    case!(parse_enum("enum Foo { BAR = -9223372036854775808; }") => ast::Enum {
        position: pos(0),
        name: "Foo".to_owned(),
        options: vec![],
        fields: vec![ast::EnumField {
            position: pos(11),
            name: "BAR".to_owned(),
            value: i64::MIN,
            options: vec![],
        }],
        reserved: vec![],
    });
    case!(parse_enum("enum Foo { BAR = 1 }") => Err(unexpected("';' or '['", "}", 19..20)));
    case!(parse_enum("enum Foo { BAR = x; }") => Err(unexpected("an integer", "x", 17..18)));
    case!(parse_enum("enum Foo { 1 }") => Err(unexpected(
        "an identifier, 'option', 'reserved' or '}'",
        "1",
        11..12
    )));
    case!(parse_enum("enum Foo { BAR = 9223372036854775808; }") => Err(
        ParseErrorKind::IntegerOutOfRange { span: 17..36 }
    ));
    case!(parse_enum("enum Foo { BAR = -9223372036854775809; }") => Err(
        ParseErrorKind::IntegerOutOfRange { span: 17..37 }
    ));
    case!(parse_enum("enum Foo { BAR = 1;") => Err(ParseErrorKind::UnexpectedEof {
        expected: "an identifier, 'option', 'reserved' or '}'".to_owned(),
        span: 19..19,
    }));
}

#[test]
fn parse_service() {
    case!(parse_service(
        "service S { option deprecated = true; rpc Get (Req) returns (Res); \
        rpc Watch (stream .pkg.Req) returns (stream Res) { option idempotency_level = NO_SIDE_EFFECTS; ; } \
        rpc Odd (stream) returns (stream.Res); }"
    ) => ast::Service {
        position: pos(0),
        name: "S".to_owned(),
        options: vec![ast::Option {
            position: pos(12),
            body: ast::ValueOption {
                position: pos(19),
                name: name("deprecated"),
                value: ast::Constant::Bool(true),
            },
        }],
        rpcs: vec![
            ast::Rpc {
                position: pos(38),
                name: "Get".to_owned(),
                request_type: ast::TypeName::from("Req"),
                request_stream: false,
                return_type: ast::TypeName::from("Res"),
                return_stream: false,
                options: vec![],
            },
            ast::Rpc {
                position: pos(67),
                name: "Watch".to_owned(),
                request_type: ast::TypeName::from(".pkg.Req"),
                request_stream: true,
                return_type: ast::TypeName::from("Res"),
                return_stream: true,
                options: vec![ast::Option {
                    position: pos(118),
                    body: ast::ValueOption {
                        position: pos(125),
                        name: name("idempotency_level"),
                        value: ast::Constant::Reference("NO_SIDE_EFFECTS".into()),
                    },
                }],
            },
            ast::Rpc {
                position: pos(166),
                name: "Odd".to_owned(),
                request_type: ast::TypeName::from("stream"),
                request_stream: false,
                return_type: ast::TypeName::from("stream.Res"),
                return_stream: false,
                options: vec![],
            },
        ],
    });
    case!(parse_service("service S { rpc Get (stream stream) returns (Res); }") => ast::Service {
        position: pos(0),
        name: "S".to_owned(),
        options: vec![],
        rpcs: vec![ast::Rpc {
            position: pos(12),
            name: "Get".to_owned(),
            request_type: ast::TypeName::from("stream"),
            request_stream: true,
            return_type: ast::TypeName::from("Res"),
            return_stream: false,
            options: vec![],
        }],
    });
    case!(parse_service("service S { rpc Get (Req) returns (Res) }") => Err(
        unexpected("';' or '{'", "}", 40..41)
    ));
    case!(parse_service("service S { rpc Get Req) returns (Res); }") => Err(
        unexpected("'('", "Req", 20..23)
    ));
    case!(parse_service("service S { message Foo {} }") => Err(
        unexpected("'rpc', 'option', ';' or '}'", "message", 12..19)
    ));
}

#[test]
fn parse_message() {
    case!(parse_message(
        "message Foo { message Bar { } enum Baz { A = 0; } map<string, Bar> m = 1; \
        option deprecated = true; oneof o { int32 x = 2; } reserved 5, 10 to max; \
        repeated .pkg.Bar bars = 3 [packed = true, (my.opt).x = \"y\"]; optional string s = 4; \
        extend google.protobuf.FieldOptions { string ext = 1000; } ; }"
    ) => ast::Message {
        position: pos(0),
        name: "Foo".to_owned(),
        enums: vec![ast::Enum {
            position: pos(30),
            name: "Baz".to_owned(),
            options: vec![],
            fields: vec![ast::EnumField {
                position: pos(41),
                name: "A".to_owned(),
                value: 0,
                options: vec![],
            }],
            reserved: vec![],
        }],
        messages: vec![empty_message(pos(14), "Bar")],
        map_fields: vec![ast::MapField {
            position: pos(50),
            key_type: ast::KeyType::String,
            value_type: ast::TypeName::from("Bar"),
            name: "m".to_owned(),
            number: 1,
            options: vec![],
        }],
        options: vec![ast::Option {
            position: pos(74),
            body: ast::ValueOption {
                position: pos(81),
                name: name("deprecated"),
                value: ast::Constant::Bool(true),
            },
        }],
        oneofs: vec![ast::Oneof {
            position: pos(100),
            name: "o".to_owned(),
            options: vec![],
            fields: vec![ast::OneofField {
                position: pos(110),
                ty: ast::TypeName::from("int32"),
                name: "x".to_owned(),
                number: 2,
                options: vec![],
            }],
        }],
        reserved: vec![ast::Reserved {
            position: pos(125),
            names: vec![],
            ranges: vec![
                ast::Range { from: 5, to: ast::RangeEnd::None },
                ast::Range { from: 10, to: ast::RangeEnd::Max },
            ],
        }],
        fields: vec![
            ast::Field {
                position: pos(148),
                label: Some(ast::FieldLabel::Repeated),
                ty: ast::TypeName::from(".pkg.Bar"),
                name: "bars".to_owned(),
                number: 3,
                options: vec![
                    ast::ValueOption {
                        position: pos(176),
                        name: name("packed"),
                        value: ast::Constant::Bool(true),
                    },
                    ast::ValueOption {
                        position: pos(191),
                        name: ast::OptionName {
                            parts: vec![
                                ast::OptionNamePart::Extension(ast::TypeName::from("my.opt")),
                                ast::OptionNamePart::Ident("x".to_owned()),
                            ],
                        },
                        value: ast::Constant::String("y".to_owned()),
                    },
                ],
            },
            ast::Field {
                position: pos(210),
                label: Some(ast::FieldLabel::Optional),
                ty: ast::TypeName::from("string"),
                name: "s".to_owned(),
                number: 4,
                options: vec![],
            },
        ],
        extends: vec![ast::Extend {
            position: pos(233),
            extendee: ast::TypeName::from("google.protobuf.FieldOptions"),
            fields: vec![ast::Field {
                position: pos(271),
                label: None,
                ty: ast::TypeName::from("string"),
                name: "ext".to_owned(),
                number: 1000,
                options: vec![],
            }],
        }],
    });
    case!(parse_message("message service {}") => empty_message(pos(0), "service"));
    case!(parse_message("message { }") => Err(unexpected("an identifier", "{", 8..9)));
    case!(parse_message("message Foo { int32 = 1; }") => Err(
        unexpected("'.' or an identifier", "=", 20..21)
    ));
    case!(parse_message("message Foo { int32 x = 1 }") => Err(
        unexpected("';' or '['", "}", 26..27)
    ));
    case!(parse_message("message Foo { int32 x = -1; }") => Err(
        unexpected("a positive integer", "-", 24..25)
    ));
    case!(parse_message("message Foo { 5 }") => Err(unexpected(
        "a message field, oneof, reserved range, enum, message, option or '}'",
        "5",
        14..15
    )));
    case!(parse_message("message Foo { int32 x = 9223372036854775808; }") => Err(
        ParseErrorKind::IntegerOutOfRange { span: 24..43 }
    ));
}

#[test]
fn parse_field() {
    case!(parse_field("int32 x = 536870912;") => ast::Field {
        position: pos(0),
        label: None,
        ty: ast::TypeName::from("int32"),
        name: "x".to_owned(),
        number: 536870912,
        options: vec![],
    });
    case!(parse_field("foo.Bar message = 0x10;") => ast::Field {
        position: pos(0),
        label: None,
        ty: ast::TypeName::from("foo.Bar"),
        name: "message".to_owned(),
        number: 16,
        options: vec![],
    });
    case!(parse_field("repeated int32 = 1;") => Err(
        unexpected("'.' or an identifier", "=", 15..16)
    ));
    case!(parse_field("int32 x 1;") => Err(unexpected("'='", "1", 8..9)));
}

#[test]
fn parse_oneof() {
    case!(parse_oneof(
        "oneof o { option (foo) = 1; string a = 1; .Bar b = 2 [deprecated = true]; }"
    ) => ast::Oneof {
        position: pos(0),
        name: "o".to_owned(),
        options: vec![ast::Option {
            position: pos(10),
            body: ast::ValueOption {
                position: pos(17),
                name: ast::OptionName {
                    parts: vec![ast::OptionNamePart::Extension(ast::TypeName::from("foo"))],
                },
                value: ast::Constant::Int(1),
            },
        }],
        fields: vec![
            ast::OneofField {
                position: pos(28),
                ty: ast::TypeName::from("string"),
                name: "a".to_owned(),
                number: 1,
                options: vec![],
            },
            ast::OneofField {
                position: pos(42),
                ty: ast::TypeName::from(".Bar"),
                name: "b".to_owned(),
                number: 2,
                options: vec![ast::ValueOption {
                    position: pos(54),
                    name: name("deprecated"),
                    value: ast::Constant::Bool(true),
                }],
            },
        ],
    });
    case!(parse_oneof("oneof o { repeated int32 x = 1; }") => Err(
        unexpected("a field type", "repeated", 10..18)
    ));
    case!(parse_oneof("oneof o { optional int32 x = 1; }") => Err(
        unexpected("a field type", "optional", 10..18)
    ));
    case!(parse_oneof("oneof o { 1 }") => Err(
        unexpected("a oneof field, option or '}'", "1", 10..11)
    ));
}

#[test]
fn parse_map_field() {
    case!(parse_map_field("map<int64, .foo.Bar> m = 1;") => ast::MapField {
        position: pos(0),
        key_type: ast::KeyType::Int64,
        value_type: ast::TypeName::from(".foo.Bar"),
        name: "m".to_owned(),
        number: 1,
        options: vec![],
    });
    case!(parse_map_field("map<string, Foo> m = 1 [(x) = 1];") => ast::MapField {
        position: pos(0),
        key_type: ast::KeyType::String,
        value_type: ast::TypeName::from("Foo"),
        name: "m".to_owned(),
        number: 1,
        options: vec![ast::ValueOption {
            position: pos(24),
            name: ast::OptionName {
                parts: vec![ast::OptionNamePart::Extension(ast::TypeName::from("x"))],
            },
            value: ast::Constant::Int(1),
        }],
    });
    case!(parse_map_field("map<Foo, string> m = 1;") => Err(
        unexpected("an integer type, 'bool' or 'string'", "Foo", 4..7)
    ));
    case!(parse_map_field("map<double, string> m = 1;") => Err(
        unexpected("an integer type, 'bool' or 'string'", "double", 4..10)
    ));
    case!(parse_map_field("map<string> m = 1;") => Err(unexpected("','", ">", 10..11)));
}

#[test]
fn map_key_types() {
    for key in [
        "int32", "int64", "uint32", "uint64", "sint32", "sint64", "fixed32", "fixed64",
        "sfixed32", "sfixed64", "bool", "string",
    ] {
        let source = format!("map<{}, bytes> m = 1;", key);
        let mut parser = Parser::new(&source, false);
        let field = parser.parse_map_field().unwrap();
        assert_eq!(field.key_type.as_str(), key);
        assert_eq!(field.key_type.to_string(), key);
    }
}

#[test]
fn parse_reserved() {
    case!(parse_reserved("reserved 1, 2 to 5, 10 to max;", false) => ast::Reserved {
        position: pos(0),
        names: vec![],
        ranges: vec![
            ast::Range { from: 1, to: ast::RangeEnd::None },
            ast::Range { from: 2, to: ast::RangeEnd::Int(5) },
            ast::Range { from: 10, to: ast::RangeEnd::Max },
        ],
    });
    case!(parse_reserved("reserved \"a\", 'b';", false) => ast::Reserved {
        position: pos(0),
        names: vec!["a".to_owned(), "b".to_owned()],
        ranges: vec![],
    });
    case!(parse_reserved("reserved -5 to -1;", true) => ast::Reserved {
        position: pos(0),
        names: vec![],
        ranges: vec![ast::Range { from: -5, to: ast::RangeEnd::Int(-1) }],
    });
    case!(parse_reserved("reserved 1, \"a\";", false) => Err(
        ParseErrorKind::MixedReserved { span: 12..15 }
    ));
    case!(parse_reserved("reserved \"a\", 1;", false) => Err(
        ParseErrorKind::MixedReserved { span: 14..15 }
    ));
    case!(parse_reserved("reserved -1;", false) => Err(
        unexpected("a positive integer", "-", 9..10)
    ));
    case!(parse_reserved("reserved 1 to;", false) => Err(
        unexpected("an integer or 'max'", ";", 13..14)
    ));
    case!(parse_reserved("reserved foo;", false) => Err(
        unexpected("a string literal or integer", "foo", 9..12)
    ));
    case!(parse_reserved("reserved 1 2;", false) => Err(
        unexpected("'to', ',' or ';'", "2", 11..12)
    ));
}

#[test]
fn parse_reserved_mixed() {
    let mut parser = Parser::new("reserved \"a\", 1, \"b\", 2 to 3;", true);
    assert_eq!(
        parser.parse_reserved(false).unwrap(),
        ast::Reserved {
            position: pos(0),
            names: vec!["a".to_owned(), "b".to_owned()],
            ranges: vec![
                ast::Range { from: 1, to: ast::RangeEnd::None },
                ast::Range { from: 2, to: ast::RangeEnd::Int(3) },
            ],
        }
    );
}

#[test]
fn parse_extend() {
    case!(parse_extend(
        "extend .google.protobuf.MessageOptions { optional string foo = 50000; }"
    ) => ast::Extend {
        position: pos(0),
        extendee: ast::TypeName::from(".google.protobuf.MessageOptions"),
        fields: vec![ast::Field {
            position: pos(41),
            label: Some(ast::FieldLabel::Optional),
            ty: ast::TypeName::from("string"),
            name: "foo".to_owned(),
            number: 50000,
            options: vec![],
        }],
    });
    case!(parse_extend("extend Foo { 1 }") => Err(
        unexpected("a message field, ';' or '}'", "1", 13..14)
    ));
}

#[test]
fn parse_import() {
    case!(parse_import("import \"foo.proto\";") => ast::Import {
        position: pos(0),
        kind: None,
        path: "foo.proto".to_owned(),
    });
    case!(parse_import("import weak \"foo.proto\";") => ast::Import {
        position: pos(0),
        kind: Some(ast::ImportKind::Weak),
        path: "foo.proto".to_owned(),
    });
    case!(parse_import("import public 'foo' \".proto\";") => ast::Import {
        position: pos(0),
        kind: Some(ast::ImportKind::Public),
        path: "foo.proto".to_owned(),
    });
    case!(parse_import("import foo;") => Err(
        unexpected("a string literal, 'public' or 'weak'", "foo", 7..10)
    ));
    case!(parse_import("import \"foo.proto\"") => Err(ParseErrorKind::UnexpectedEof {
        expected: "';'".to_owned(),
        span: 18..18,
    }));
}

#[test]
fn parse_package() {
    case!(parse_package("package foo.bar;") => ast::Package {
        position: pos(0),
        name: "foo.bar".into(),
    });
    case!(parse_package("package foo bar;") => Err(unexpected("'.' or ';'", "bar", 12..15)));
    case!(parse_package("package ;") => Err(unexpected("an identifier", ";", 8..9)));
}

#[test]
fn parse_proto() {
    case!(parse_proto("syntax = \"proto3\";\npackage foo;\n\nmessage Bar {}\n") => ast::Proto {
        position: pos(0),
        syntax: "proto3".to_owned(),
        imports: vec![],
        packages: vec![ast::Package {
            position: Position {
                offset: 19,
                line: 2,
                column: 1,
            },
            name: "foo".into(),
        }],
        options: vec![],
        enums: vec![],
        services: vec![],
        messages: vec![empty_message(
            Position {
                offset: 33,
                line: 4,
                column: 1,
            },
            "Bar",
        )],
        extends: vec![],
    });
    case!(parse_proto("syntax = 'proto3';;;") => ast::Proto {
        position: pos(0),
        syntax: "proto3".to_owned(),
        imports: vec![],
        packages: vec![],
        options: vec![],
        enums: vec![],
        services: vec![],
        messages: vec![],
        extends: vec![],
    });
    case!(parse_proto("package foo;") => Err(unexpected("'syntax'", "package", 0..7)));
    case!(parse_proto("") => Err(ParseErrorKind::UnexpectedEof {
        expected: "'syntax'".to_owned(),
        span: 0..0,
    }));
    case!(parse_proto("syntax = \"proto3\"; foo") => Err(unexpected(
        "'import', 'package', 'option', 'enum', 'service', 'message', 'extend' or ';'",
        "foo",
        19..22
    )));
    case!(parse_proto("syntax = \"proto3\"; message Foo { int32 x = 1foo; }") => Err(
        ParseErrorKind::NoSpaceBetweenIntAndIdent { span: 43..47 }
    ));
}

#[test]
fn fmt_expected_list() {
    assert_eq!(fmt_expected([Token::Dot].into_iter()), "'.'");
    assert_eq!(
        fmt_expected([Token::Dot, ANY_IDENT].into_iter()),
        "'.' or an identifier"
    );
    assert_eq!(
        fmt_expected([Token::Dot, Token::Comma, Token::RightBracket].into_iter()),
        "'.', ',' or ']'"
    );
}
