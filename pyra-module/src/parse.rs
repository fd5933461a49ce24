//! Declaration parsing from files and strings.

use std::{path::Path, str::FromStr};

use pyra_registry::{IngressSettings, MemorySize, ParamKind};
use toml::Value;

use crate::{
    Error, Result,
    decl::{FunctionDecl, IntSetting, ModuleDecl, OptionsDecl, ParamDecl, TriggerKindDecl},
    error::SourceContext,
    validate::ParseContext,
};

impl FromStr for ModuleDecl {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_module(s, "functions.toml")
    }
}

impl ModuleDecl {
    /// Parse a functions.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_module(&content, &path.display().to_string())
    }

    /// Parse a functions.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_module(content, filename)
    }
}

/// Parse a declaration from content with the given filename for error reporting.
pub fn parse_module(content: &str, filename: &str) -> Result<ModuleDecl> {
    let source_ctx = SourceContext::new(content, filename);
    let decl: ModuleDecl = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_decl(&decl, content, filename)?;
    Ok(decl)
}

/// Validate the declaration after parsing.
fn validate_decl(decl: &ModuleDecl, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    ctx.validate_name(&decl.module.name, "module")?;

    validate_options(&decl.defaults, &ctx.push("defaults"))?;

    for (name, param) in &decl.params {
        let param_ctx = ctx.push("params");
        param_ctx.validate_name(name, "param")?;
        validate_param(name, param, &param_ctx)?;
    }

    for (name, func) in &decl.functions {
        ctx.push("functions").validate_name(name, "function")?;

        let func_ctx = ctx.push("functions").push(name);
        validate_function(name, func, &func_ctx)?;
    }

    Ok(())
}

fn validate_param(name: &str, param: &ParamDecl, ctx: &ParseContext) -> Result<()> {
    let Some(default) = &param.default else {
        return Ok(());
    };

    let matches = match param.kind {
        ParamKind::String => matches!(default, Value::String(_)),
        ParamKind::Int => matches!(default, Value::Integer(_)),
        ParamKind::Float => matches!(default, Value::Float(_) | Value::Integer(_)),
        ParamKind::Bool => matches!(default, Value::Boolean(_)),
        // Secrets resolve from the secret store, never from a literal.
        ParamKind::Secret => {
            return Err(ctx.fail(name, format!("secret param '{name}' cannot take a default")));
        }
    };

    if !matches {
        return Err(ctx.fail(
            name,
            format!("default for param '{name}' does not match its declared type"),
        ));
    }

    Ok(())
}

fn validate_function(name: &str, func: &FunctionDecl, ctx: &ParseContext) -> Result<()> {
    if let Some(handler) = &func.handler {
        ctx.validate_handler_path(handler)?;
    }

    validate_trigger_fields(name, func, ctx)?;
    validate_options(&func.options(), ctx)?;

    Ok(())
}

/// Reject kind-specific fields declared on the wrong trigger family.
fn validate_trigger_fields(name: &str, func: &FunctionDecl, ctx: &ParseContext) -> Result<()> {
    let kind = func.trigger.as_str();
    let reject = |field: &str| {
        Err(ctx.fail(
            name,
            format!("field '{field}' does not apply to {kind} function '{name}'"),
        ))
    };

    match func.trigger {
        TriggerKindDecl::Https => {
            if func.topic.is_some() {
                return reject("topic");
            }
            if func.retry.is_some() {
                return reject("retry");
            }
            if func.schedule.is_some() {
                return reject("schedule");
            }
            if func.timezone.is_some() {
                return reject("timezone");
            }
            if func.retry_policy.is_some() {
                return reject("retry_policy");
            }
            if let Some(invoker) = &func.invoker
                && invoker.is_empty()
            {
                return Err(ctx.fail(name, format!("invoker list for '{name}' is empty")));
            }
        }
        TriggerKindDecl::Callable => {
            if func.invoker.is_some() {
                return reject("invoker");
            }
            if func.topic.is_some() {
                return reject("topic");
            }
            if func.retry.is_some() {
                return reject("retry");
            }
            if func.schedule.is_some() {
                return reject("schedule");
            }
            if func.timezone.is_some() {
                return reject("timezone");
            }
            if func.retry_policy.is_some() {
                return reject("retry_policy");
            }
        }
        TriggerKindDecl::Pubsub => {
            if func.invoker.is_some() {
                return reject("invoker");
            }
            if func.schedule.is_some() {
                return reject("schedule");
            }
            if func.timezone.is_some() {
                return reject("timezone");
            }
            if func.retry_policy.is_some() {
                return reject("retry_policy");
            }
            match &func.topic {
                None => {
                    return Err(
                        ctx.fail(name, format!("pubsub function '{name}' requires a topic"))
                    );
                }
                Some(topic) if topic.is_empty() => {
                    return Err(ctx.fail(name, format!("topic for '{name}' is empty")));
                }
                Some(_) => {}
            }
        }
        TriggerKindDecl::Schedule => {
            if func.invoker.is_some() {
                return reject("invoker");
            }
            if func.topic.is_some() {
                return reject("topic");
            }
            if func.retry.is_some() {
                return reject("retry");
            }
            match &func.schedule {
                None => {
                    return Err(ctx.fail(
                        name,
                        format!("schedule function '{name}' requires a schedule expression"),
                    ));
                }
                Some(schedule) if schedule.is_empty() => {
                    return Err(ctx.fail(name, format!("schedule for '{name}' is empty")));
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}

fn validate_options(options: &OptionsDecl, ctx: &ParseContext) -> Result<()> {
    let location = ctx.path_string();

    for (field, setting) in [
        ("memory", &options.memory),
        ("timeout_seconds", &options.timeout_seconds),
        ("min_instances", &options.min_instances),
        ("max_instances", &options.max_instances),
        ("concurrency", &options.concurrency),
    ] {
        if let Some(IntSetting::Keyword(word)) = setting
            && word != "default"
        {
            return Err(ctx.fail(
                field,
                format!("'{location}': {field} expects an integer or \"default\", got '{word}'"),
            ));
        }
    }

    if let Some(IntSetting::Value(mb)) = options.memory
        && MemorySize::from_mb(mb).is_none()
    {
        return Err(ctx
            .source_context()
            .invalid_memory_error(location, mb, ctx.find_span("memory")));
    }

    for (field, setting) in [
        ("timeout_seconds", &options.timeout_seconds),
        ("concurrency", &options.concurrency),
    ] {
        if let Some(IntSetting::Value(0)) = setting {
            return Err(ctx.fail(field, format!("'{location}': {field} must be at least 1")));
        }
    }

    if let (Some(IntSetting::Value(min)), Some(IntSetting::Value(max))) =
        (&options.min_instances, &options.max_instances)
        && min > max
    {
        return Err(ctx.fail(
            "min_instances",
            format!("'{location}': min_instances ({min}) exceeds max_instances ({max})"),
        ));
    }

    if let Some(ingress) = &options.ingress
        && ingress != "default"
        && ingress.parse::<IngressSettings>().is_err()
    {
        return Err(ctx.fail(
            "ingress",
            format!(
                "'{location}': unknown ingress setting '{ingress}' \
                 (expected ALLOW_ALL, ALLOW_INTERNAL_ONLY, ALLOW_INTERNAL_AND_GCLB, or \"default\")"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ModuleDecl> {
        parse_module(content, "functions.toml")
    }

    #[test]
    fn test_reserved_keyword_module_name() {
        let err = parse(
            r#"
            [module]
            name = "fn"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }

    #[test]
    fn test_invalid_function_name() {
        let err = parse(
            r#"
            [module]
            name = "app"

            [functions.bad-name]
            trigger = "https"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_pubsub_requires_topic() {
        let err = parse(
            r#"
            [module]
            name = "app"

            [functions.on_event]
            trigger = "pubsub"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
        assert!(err.to_string().contains("requires a topic"));
    }

    #[test]
    fn test_topic_rejected_on_https() {
        let err = parse(
            r#"
            [module]
            name = "app"

            [functions.greet]
            trigger = "https"
            topic = "users"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not apply"));
    }

    #[test]
    fn test_invalid_memory_size() {
        let err = parse(
            r#"
            [module]
            name = "app"

            [functions.greet]
            trigger = "https"
            memory = 300
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidMemory { mb: 300, .. }));
    }

    #[test]
    fn test_min_exceeding_max_rejected() {
        let err = parse(
            r#"
            [module]
            name = "app"

            [functions.greet]
            trigger = "https"
            min_instances = 5
            max_instances = 2
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("exceeds max_instances"));
    }

    #[test]
    fn test_bad_sentinel_keyword() {
        let err = parse(
            r#"
            [module]
            name = "app"

            [functions.greet]
            trigger = "https"
            max_instances = "lots"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("expects an integer"));
    }

    #[test]
    fn test_secret_param_default_rejected() {
        let err = parse(
            r#"
            [module]
            name = "app"

            [params.API_KEY]
            type = "secret"
            default = "hunter2"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("cannot take a default"));
    }

    #[test]
    fn test_param_default_type_mismatch() {
        let err = parse(
            r#"
            [module]
            name = "app"

            [params.RETRIES]
            type = "int"
            default = "three"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_valid_module_parses() {
        let decl = parse(
            r#"
            [module]
            name = "greeter"
            region = "europe-west1"

            [defaults]
            max_instances = 100

            [params.WELCOME_TOPIC]
            type = "string"
            default = "welcome"

            [functions.greet_user]
            trigger = "https"
            memory = 256
            min_instances = 1

            [functions.on_user_created]
            trigger = "pubsub"
            topic = "users"
            retry = true
            "#,
        )
        .unwrap();

        assert_eq!(decl.functions.len(), 2);
        assert_eq!(decl.params.len(), 1);
    }
}
