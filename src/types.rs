//! Dynamic type descriptors.
//!
//! Every [`Value`](crate::Value) except `Invalid` has a [`Type`]. Unnamed composite
//! types are structural (`Vec<i64>`, `&geometry::Point`, `Map<String, u8>`), records
//! and named interfaces are nominal and identified by their [`TypeName`].
//!
//! Two values can only be deep-equal when their types compare equal, so `i32` and
//! `i64` holding the same number are different values.
//!
//! ```rust
//! use introspect::{Type, TypeName, IntKind};
//!
//! let point = Type::record(TypeName::new("geometry::Point"));
//! assert_eq!(Type::reference(point.clone()).to_string(), "&geometry::Point");
//! assert_eq!(Type::slice(Type::Int(IntKind::I64)).to_string(), "Vec<i64>");
//! ```

use std::fmt;
use std::sync::Arc;

/// Width of a signed integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
}

impl IntKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            IntKind::I8 => "i8",
            IntKind::I16 => "i16",
            IntKind::I32 => "i32",
            IntKind::I64 => "i64",
            IntKind::Isize => "isize",
        }
    }
}

/// Width of an unsigned integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UintKind {
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl UintKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            UintKind::U8 => "u8",
            UintKind::U16 => "u16",
            UintKind::U32 => "u32",
            UintKind::U64 => "u64",
            UintKind::Usize => "usize",
        }
    }
}

/// Width of a float, or of each component of a complex number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatKind {
    F32,
    F64,
}

impl FloatKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FloatKind::F32 => "f32",
            FloatKind::F64 => "f64",
        }
    }
}

/// A nominal type name, optionally qualified by the module that declares it.
///
/// # Examples
///
/// ```rust
/// use introspect::TypeName;
///
/// let name = TypeName::new("shapes::circle::Circle");
/// assert_eq!(name.module(), Some("shapes::circle"));
/// assert_eq!(name.name(), "Circle");
/// assert_eq!(name.to_string(), "shapes::circle::Circle");
///
/// assert_eq!(TypeName::new("Point").module(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeName {
    module: Option<Arc<str>>,
    name: Arc<str>,
}

impl TypeName {
    /// Parses a possibly `::`-qualified path. The last segment is the name.
    #[must_use]
    pub fn new(path: &str) -> Self {
        match path.rsplit_once("::") {
            Some((module, name)) if !module.is_empty() => TypeName::in_module(module, name),
            Some((_, name)) => TypeName {
                module: None,
                name: Arc::from(name),
            },
            None => TypeName {
                module: None,
                name: Arc::from(path),
            },
        }
    }

    #[must_use]
    pub fn in_module(module: &str, name: &str) -> Self {
        TypeName {
            module: Some(Arc::from(module)),
            name: Arc::from(name),
        }
    }

    #[inline]
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Some(module) => write!(f, "{}::{}", module, self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&str> for TypeName {
    fn from(path: &str) -> Self {
        TypeName::new(path)
    }
}

/// Shape category of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Invalid,
    Bool,
    Int,
    Uint,
    Float,
    Complex,
    String,
    Ref,
    Interface,
    Array,
    Slice,
    Record,
    Map,
    Chan,
    Func,
    RawPtr,
}

impl Kind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Invalid => "invalid",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Complex => "complex",
            Kind::String => "string",
            Kind::Ref => "ref",
            Kind::Interface => "interface",
            Kind::Array => "array",
            Kind::Slice => "slice",
            Kind::Record => "record",
            Kind::Map => "map",
            Kind::Chan => "chan",
            Kind::Func => "func",
            Kind::RawPtr => "raw pointer",
        }
    }

    /// Records and arrays are stored inline in their parent and have no identity
    /// of their own beyond their location.
    #[inline]
    #[must_use]
    pub const fn is_inline_composite(self) -> bool {
        matches!(self, Kind::Record | Kind::Array)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The dynamic type of a value.
///
/// Child types are shared behind [`Arc`] so cloning a `Type` never deep-copies.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Int(IntKind),
    Uint(UintKind),
    Float(FloatKind),
    Complex(FloatKind),
    String,
    /// Reference to a heap slot holding a value of the inner type.
    Ref(Arc<Type>),
    /// Tagged union. `None` is the anonymous `dyn Any`.
    Interface(Option<TypeName>),
    Array(usize, Arc<Type>),
    Slice(Arc<Type>),
    Record(TypeName),
    Map(Arc<Type>, Arc<Type>),
    Chan(Arc<Type>),
    /// Function, identified by its signature text.
    Func(Arc<str>),
    RawPtr,
}

impl Type {
    #[must_use]
    pub fn reference(pointee: Type) -> Self {
        Type::Ref(Arc::new(pointee))
    }

    #[must_use]
    pub fn slice(elem: Type) -> Self {
        Type::Slice(Arc::new(elem))
    }

    #[must_use]
    pub fn array(len: usize, elem: Type) -> Self {
        Type::Array(len, Arc::new(elem))
    }

    #[must_use]
    pub fn map(key: Type, value: Type) -> Self {
        Type::Map(Arc::new(key), Arc::new(value))
    }

    #[must_use]
    pub fn chan(elem: Type) -> Self {
        Type::Chan(Arc::new(elem))
    }

    #[must_use]
    pub fn func(signature: &str) -> Self {
        Type::Func(Arc::from(signature))
    }

    #[must_use]
    pub fn record(name: impl Into<TypeName>) -> Self {
        Type::Record(name.into())
    }

    /// The anonymous interface, `dyn Any`.
    #[must_use]
    pub const fn any() -> Self {
        Type::Interface(None)
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Type::Bool => Kind::Bool,
            Type::Int(_) => Kind::Int,
            Type::Uint(_) => Kind::Uint,
            Type::Float(_) => Kind::Float,
            Type::Complex(_) => Kind::Complex,
            Type::String => Kind::String,
            Type::Ref(_) => Kind::Ref,
            Type::Interface(_) => Kind::Interface,
            Type::Array(..) => Kind::Array,
            Type::Slice(_) => Kind::Slice,
            Type::Record(_) => Kind::Record,
            Type::Map(..) => Kind::Map,
            Type::Chan(_) => Kind::Chan,
            Type::Func(_) => Kind::Func,
            Type::RawPtr => Kind::RawPtr,
        }
    }

    /// The nominal name, for records and named interfaces.
    #[must_use]
    pub fn name(&self) -> Option<&TypeName> {
        match self {
            Type::Record(name) | Type::Interface(Some(name)) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::Int(kind) => f.write_str(kind.as_str()),
            Type::Uint(kind) => f.write_str(kind.as_str()),
            Type::Float(kind) => f.write_str(kind.as_str()),
            Type::Complex(kind) => write!(f, "Complex<{}>", kind.as_str()),
            Type::String => f.write_str("String"),
            Type::Ref(pointee) => write!(f, "&{}", pointee),
            Type::Interface(None) => f.write_str("dyn Any"),
            Type::Interface(Some(name)) => write!(f, "dyn {}", name),
            Type::Array(len, elem) => write!(f, "[{}; {}]", elem, len),
            Type::Slice(elem) => write!(f, "Vec<{}>", elem),
            Type::Record(name) => write!(f, "{}", name),
            Type::Map(key, value) => write!(f, "Map<{}, {}>", key, value),
            Type::Chan(elem) => write!(f, "Chan<{}>", elem),
            Type::Func(signature) => f.write_str(signature),
            Type::RawPtr => f.write_str("*const ()"),
        }
    }
}
