//! Built-in type alias mapping between language keywords and runtime short names.

/// Maps a language keyword alias to its runtime short name.
///
/// Returns the runtime name for the known built-in aliases (`string` → `String`,
/// `int` → `Int32`, unsigned and short variants included) and the input unchanged
/// for everything else, so the function can be applied to both sides of a
/// comparison unconditionally. Intermediate-language spellings (`int32`,
/// `float64`, ...) map too, since extracted reference tokens carry them.
#[must_use]
pub fn builtin_alias_name(name: &str) -> &str {
    match name {
        "string" => "String",
        "int" | "int32" => "Int32",
        "uint" | "uint32" | "unsigned int32" => "UInt32",
        "long" | "int64" => "Int64",
        "ulong" | "uint64" | "unsigned int64" => "UInt64",
        "short" | "int16" => "Int16",
        "ushort" | "uint16" | "unsigned int16" => "UInt16",
        "byte" | "uint8" | "unsigned int8" => "Byte",
        "sbyte" | "int8" => "SByte",
        "bool" => "Boolean",
        "double" | "float64" => "Double",
        "float" | "float32" => "Single",
        "char" => "Char",
        "object" => "Object",
        "void" => "Void",
        "decimal" => "Decimal",
        other => other,
    }
}
