//! Operator token to reserved metadata name mapping.

/// Derives the reserved metadata method name for an operator token.
///
/// Covers the CLS operator set; anything unknown degrades deterministically to
/// `op_` plus the trimmed token text. Used as the fallback when the symbol model
/// did not resolve the operator's metadata name itself.
#[must_use]
pub fn operator_metadata_name(token: &str) -> String {
    let known = match token.trim() {
        "+" => "op_Addition",
        "-" => "op_Subtraction",
        "*" => "op_Multiply",
        "/" => "op_Division",
        "%" => "op_Modulus",
        "==" => "op_Equality",
        "!=" => "op_Inequality",
        "<" => "op_LessThan",
        ">" => "op_GreaterThan",
        "<=" => "op_LessThanOrEqual",
        ">=" => "op_GreaterThanOrEqual",
        "!" => "op_LogicalNot",
        "~" => "op_OnesComplement",
        "++" => "op_Increment",
        "--" => "op_Decrement",
        "true" => "op_True",
        "false" => "op_False",
        "&" => "op_BitwiseAnd",
        "|" => "op_BitwiseOr",
        "^" => "op_ExclusiveOr",
        "<<" => "op_LeftShift",
        ">>" => "op_RightShift",
        ">>>" => "op_UnsignedRightShift",
        _ => return format!("op_{}", token.trim()),
    };
    known.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cls_operator_tokens() {
        assert_eq!(operator_metadata_name("+"), "op_Addition");
        assert_eq!(operator_metadata_name("=="), "op_Equality");
        assert_eq!(operator_metadata_name("<<"), "op_LeftShift");
        assert_eq!(operator_metadata_name("true"), "op_True");
    }

    #[test]
    fn test_unknown_token_falls_back_deterministically() {
        assert_eq!(operator_metadata_name("??"), "op_??");
        assert_eq!(operator_metadata_name(" ?? "), "op_??");
    }
}
