//! Identifier casing for generated code

/// Convert a snake_case or space separated name to PascalCase
pub fn pascal_case(name: &str) -> String {
    name.split(|c| c == '_' || c == ' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Package/directory name for a game or project name (`-` and `_` removed)
pub fn package_name(name: &str) -> String {
    name.chars().filter(|c| *c != '-' && *c != '_').collect()
}
