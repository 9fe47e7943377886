//! The syntax tree produced by [`parse`](crate::parse).
//!
//! Each declaration owns its children and records the [`Position`] of the first token it was
//! parsed from. Declarations of different kinds within the same scope are collected into
//! separate lists, so the relative order of, say, a message's fields and its nested enums is not
//! kept. Sorting by [`Position::offset`] recovers the source order when it is needed.

use std::fmt;

/// A location in a source file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// The byte offset from the start of the file.
    pub offset: usize,
    /// The line number, starting at 1.
    pub line: usize,
    /// The column number in characters, starting at 1.
    pub column: usize,
}

/// A parsed `.proto` file.
#[derive(Clone, Debug, PartialEq)]
pub struct Proto {
    pub position: Position,
    /// The contents of the `syntax` string, normally `proto3`.
    pub syntax: String,
    pub imports: Vec<Import>,
    pub packages: Vec<Package>,
    pub options: Vec<Option>,
    pub enums: Vec<Enum>,
    pub services: Vec<Service>,
    pub messages: Vec<Message>,
    pub extends: Vec<Extend>,
}

/// A dotted name such as `foo.bar.Baz`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FullIdent {
    pub parts: Vec<String>,
}

/// A reference to a type, which may be fully qualified with a leading `.`.
///
/// Scalar types like `int32` are represented as single-part names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeName {
    pub leading_dot: bool,
    pub name: FullIdent,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    String(String),
    Float(f64),
    /// The magnitude of an integer literal. Negative values are wrapped in [`Constant::Negated`].
    Int(u64),
    Bool(bool),
    Reference(FullIdent),
    Negated(Box<Constant>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Import {
    pub position: Position,
    pub kind: std::option::Option<ImportKind>,
    pub path: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImportKind {
    Weak,
    Public,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Package {
    pub position: Position,
    pub name: FullIdent,
}

/// An `option name = value;` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Option {
    pub position: Position,
    pub body: ValueOption,
}

/// An option assignment without the `option` keyword or terminator, as found in `[...]` lists.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueOption {
    pub position: Position,
    pub name: OptionName,
    pub value: Constant,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OptionName {
    pub parts: Vec<OptionNamePart>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OptionNamePart {
    Ident(String),
    /// A parenthesized extension name, such as `(my.ext)`.
    Extension(TypeName),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enum {
    pub position: Position,
    pub name: String,
    pub options: Vec<Option>,
    pub fields: Vec<EnumField>,
    pub reserved: Vec<Reserved>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumField {
    pub position: Position,
    pub name: String,
    pub value: i64,
    pub options: Vec<ValueOption>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub position: Position,
    pub name: String,
    pub enums: Vec<Enum>,
    pub messages: Vec<Message>,
    pub map_fields: Vec<MapField>,
    pub options: Vec<Option>,
    pub oneofs: Vec<Oneof>,
    pub reserved: Vec<Reserved>,
    pub fields: Vec<Field>,
    pub extends: Vec<Extend>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub position: Position,
    pub label: std::option::Option<FieldLabel>,
    pub ty: TypeName,
    pub name: String,
    pub number: i64,
    pub options: Vec<ValueOption>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldLabel {
    Repeated,
    Optional,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OneofField {
    pub position: Position,
    pub ty: TypeName,
    pub name: String,
    pub number: i64,
    pub options: Vec<ValueOption>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Oneof {
    pub position: Position,
    pub name: String,
    pub options: Vec<Option>,
    pub fields: Vec<OneofField>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapField {
    pub position: Position,
    pub key_type: KeyType,
    pub value_type: TypeName,
    pub name: String,
    pub number: i64,
    pub options: Vec<ValueOption>,
}

/// The scalar types allowed as the key of a map field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyType {
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reserved {
    pub position: Position,
    pub names: Vec<String>,
    pub ranges: Vec<Range>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Range {
    pub from: i64,
    pub to: RangeEnd,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RangeEnd {
    /// The range contains the single value `from`.
    None,
    Int(i64),
    Max,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Service {
    pub position: Position,
    pub name: String,
    pub options: Vec<Option>,
    pub rpcs: Vec<Rpc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rpc {
    pub position: Position,
    pub name: String,
    pub request_type: TypeName,
    pub request_stream: bool,
    pub return_type: TypeName,
    pub return_stream: bool,
    pub options: Vec<Option>,
}

/// An `extend Target { ... }` block, used to declare custom options.
#[derive(Clone, Debug, PartialEq)]
pub struct Extend {
    pub position: Position,
    pub extendee: TypeName,
    pub fields: Vec<Field>,
}

impl Field {
    pub fn is_repeated(&self) -> bool {
        self.label == Some(FieldLabel::Repeated)
    }
}

impl Range {
    pub fn to_max(&self) -> bool {
        self.to == RangeEnd::Max
    }
}

impl KeyType {
    pub(crate) fn from_name(name: &str) -> std::option::Option<Self> {
        match name {
            "int32" => Some(KeyType::Int32),
            "int64" => Some(KeyType::Int64),
            "uint32" => Some(KeyType::Uint32),
            "uint64" => Some(KeyType::Uint64),
            "sint32" => Some(KeyType::Sint32),
            "sint64" => Some(KeyType::Sint64),
            "fixed32" => Some(KeyType::Fixed32),
            "fixed64" => Some(KeyType::Fixed64),
            "sfixed32" => Some(KeyType::Sfixed32),
            "sfixed64" => Some(KeyType::Sfixed64),
            "bool" => Some(KeyType::Bool),
            "string" => Some(KeyType::String),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Int32 => "int32",
            KeyType::Int64 => "int64",
            KeyType::Uint32 => "uint32",
            KeyType::Uint64 => "uint64",
            KeyType::Sint32 => "sint32",
            KeyType::Sint64 => "sint64",
            KeyType::Fixed32 => "fixed32",
            KeyType::Fixed64 => "fixed64",
            KeyType::Sfixed32 => "sfixed32",
            KeyType::Sfixed64 => "sfixed64",
            KeyType::Bool => "bool",
            KeyType::String => "string",
        }
    }
}

impl<S: Into<String>> FromIterator<S> for FullIdent {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        FullIdent {
            parts: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&str> for FullIdent {
    fn from(name: &str) -> Self {
        name.split('.').collect()
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        match name.strip_prefix('.') {
            Some(name) => TypeName {
                leading_dot: true,
                name: name.into(),
            },
            None => TypeName {
                leading_dot: false,
                name: name.into(),
            },
        }
    }
}

impl fmt::Display for FullIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, part) in self.parts.iter().enumerate() {
            if index != 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.leading_dot {
            write!(f, ".")?;
        }
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, part) in self.parts.iter().enumerate() {
            if index != 0 {
                write!(f, ".")?;
            }
            match part {
                OptionNamePart::Ident(ident) => write!(f, "{}", ident)?,
                OptionNamePart::Extension(extension) => write!(f, "({})", extension)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldLabel::Repeated => write!(f, "repeated"),
            FieldLabel::Optional => write!(f, "optional"),
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportKind::Weak => write!(f, "weak"),
            ImportKind::Public => write!(f, "public"),
        }
    }
}
