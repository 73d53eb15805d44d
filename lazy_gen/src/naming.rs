/* Identifier mapping from schema names to Rust names */

/* Rust reserved keywords that need to be escaped with r# */
const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where",
    "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "gen",
];

/* Keywords that cannot be raw identifiers */
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/* Methods every generated accessor already has; getters must not shadow them */
const ACCESSOR_METHODS: &[&str] = &[
    "read", "view", "visit_children", "visit_value", "decode", "base", "tag",
];

/* Names the generated unit defines or imports at top level */
pub const RESERVED_TYPE_NAMES: &[&str] = &[
    "Object", "View", "Sequence", "Decode", "DecodeError", "LazyObject", "ObjectVisitor",
    "VisitValue", "Result", "Option", "Ok", "Err", "Some", "None", "Self", "From",
];

/* Names defined inside every abstract type's module */
pub const RESERVED_VARIANT_NAMES: &[&str] = &["Base", "Type"];

pub fn escape_rust_keyword(name: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

fn words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            /* `fooBar` and the `B` of `HTTPBody` both start a new word */
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub fn to_pascal(name: &str) -> String {
    words(name)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

pub fn to_snake(name: &str) -> String {
    words(name).iter().map(|word| word.to_lowercase()).collect::<Vec<_>>().join("_")
}

/* Getter name for a schema field */
pub fn field_ident(name: &str) -> String {
    let snake = to_snake(name);
    let snake = if snake.is_empty() || snake.starts_with(|c: char| c.is_ascii_digit()) {
        format!("field_{}", snake)
    } else {
        snake
    };
    if ACCESSOR_METHODS.contains(&snake.as_str()) {
        format!("{}_", snake)
    } else {
        escape_rust_keyword(&snake)
    }
}

/* Module holding an abstract type's base, variants and dispatch */
pub fn module_ident(type_name: &str) -> String {
    escape_rust_keyword(&to_snake(type_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_and_snake_cases() {
        assert_eq!(to_pascal("point"), "Point");
        assert_eq!(to_pascal("ArgumentBlockApplication"), "ArgumentBlockApplication");
        assert_eq!(to_pascal("text_literal"), "TextLiteral");
        assert_eq!(to_snake("ArgumentBlockApplication"), "argument_block_application");
        assert_eq!(to_snake("HTTPBody"), "http_body");
        assert_eq!(to_snake("spanLeftOffset"), "span_left_offset");
        assert_eq!(to_snake("x"), "x");
    }

    #[test]
    fn field_idents_avoid_keywords_and_accessor_methods() {
        assert_eq!(field_ident("type"), "r#type");
        assert_eq!(field_ident("self"), "self_");
        assert_eq!(field_ident("read"), "read_");
        assert_eq!(field_ident("view"), "view_");
        assert_eq!(field_ident("leftOffset"), "left_offset");
        assert_eq!(field_ident("0"), "field_0");
    }

    #[test]
    fn module_idents() {
        assert_eq!(module_ident("Shape"), "shape");
        assert_eq!(module_ident("Type"), "r#type");
    }
}
