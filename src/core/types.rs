use std::fmt;

/// Runtime type tag of a [`Value`](super::Value).
///
/// Also used for the (never enforced) annotations attached to typed
/// function signatures, the same way a type hint is only metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Any,
    None,
    Bool,
    Int,
    Float,
    Str,

    // Composite types
    List(Box<Type>),
    Tuple(Vec<Type>),
    Dict(Box<Type>, Box<Type>),

    // Function types: (params) -> return
    Function(Vec<Type>, Box<Type>),
}

impl Type {
    /// Name of the builtin class, as `type(x).__name__` reports it
    pub fn class_name(&self) -> &'static str {
        match self {
            Type::Any => "object",
            Type::None => "NoneType",
            Type::Bool => "bool",
            Type::Int => "int",
            Type::Float => "float",
            Type::Str => "str",
            Type::List(_) => "list",
            Type::Tuple(_) => "tuple",
            Type::Dict(_, _) => "dict",
            Type::Function(_, _) => "function",
        }
    }

    /// `type(x)` as printed by the interpreter: `<class 'int'>`
    pub fn class_repr(&self) -> String {
        format!("<class '{}'>", self.class_name())
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Bool | Type::Int | Type::Float)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => write!(f, "Any"),
            Type::None => write!(f, "None"),
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Str => write!(f, "str"),
            Type::List(t) => write!(f, "list[{}]", t),
            Type::Tuple(ts) => write!(
                f,
                "tuple[{}]",
                ts.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ")
            ),
            Type::Dict(k, v) => write!(f, "dict[{}, {}]", k, v),
            Type::Function(params, ret) => write!(
                f,
                "({}) -> {}",
                params.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", "),
                ret
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_repr() {
        assert_eq!(Type::Int.class_repr(), "<class 'int'>");
        assert_eq!(Type::Tuple(vec![]).class_repr(), "<class 'tuple'>");
        assert_eq!(Type::None.class_name(), "NoneType");
    }

    #[test]
    fn test_annotation_display() {
        let sig = Type::Function(vec![Type::Int, Type::Int], Box::new(Type::Int));
        assert_eq!(sig.to_string(), "(int, int) -> int");
        assert_eq!(Type::Dict(Box::new(Type::Str), Box::new(Type::Any)).to_string(), "dict[str, Any]");
    }
}
