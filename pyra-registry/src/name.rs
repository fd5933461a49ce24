//! Name normalization for provider endpoint ids.

/// Normalize a declared function name to its provider endpoint id.
///
/// The platform collapses case and strips underscores when it derives the
/// deployed endpoint name, so `greet_user` and `GreetUser` both deploy as
/// `greetuser`. Duplicate detection in the registry runs on this form.
pub fn endpoint_id(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_id_strips_underscores() {
        assert_eq!(endpoint_id("greet_user"), "greetuser");
        assert_eq!(endpoint_id("on_user_created"), "onusercreated");
    }

    #[test]
    fn test_endpoint_id_lowercases() {
        assert_eq!(endpoint_id("GreetUser"), "greetuser");
        assert_eq!(endpoint_id("HTTPFunction"), "httpfunction");
    }

    #[test]
    fn test_endpoint_id_plain_names_unchanged() {
        assert_eq!(endpoint_id("cleanup"), "cleanup");
        assert_eq!(endpoint_id(""), "");
    }
}
