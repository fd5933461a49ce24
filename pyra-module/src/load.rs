//! The load phase: explicit registration of declared functions.
//!
//! Converts a parsed [`ModuleDecl`] into a [`Registry`]. This is the only
//! place registrations happen; afterwards the registry is read-only for the
//! rest of the process.

use pyra_registry::{
    FunctionDefinition, IngressSettings, MemorySize, Param, ParamDefault, Registry, RegistryError,
    RetryPolicy, RuntimeOptions, Setting, TriggerSpec, VpcOptions,
};
use toml::Value;

use crate::{
    Result,
    decl::{FunctionDecl, IntSetting, ModuleDecl, OptionsDecl, RetryPolicyDecl, TriggerKindDecl},
    validate::ParseContext,
};

/// Build a registry from a validated declaration.
///
/// Registration order is declaration order. Source and filename are carried
/// for span-anchored duplicate diagnostics.
pub fn build_registry(decl: &ModuleDecl, src: &str, filename: &str) -> Result<Registry> {
    let ctx = ParseContext::new(src, filename);
    let mut registry = Registry::new();

    for (name, param) in &decl.params {
        let declared = Param {
            name: name.clone(),
            kind: param.kind,
            default: param.default.as_ref().map(param_default),
            description: param.description.clone(),
            label: param.label.clone(),
        };
        if let Err(err) = registry.declare_param(declared) {
            return Err(ctx.fail(name, err.to_string()));
        }
    }

    let defaults = lower_options(&decl.defaults, None);

    for (name, func) in &decl.functions {
        let options = lower_options(&func.options(), func.region.clone())
            .or_defaults(&defaults)
            .or_defaults(&module_defaults(decl));

        let definition = FunctionDefinition {
            name: name.clone(),
            handler: func.handler.clone().unwrap_or_else(|| name.clone()),
            trigger: lower_trigger(func),
            options,
        };

        match registry.register(definition) {
            Ok(()) => {}
            Err(RegistryError::DuplicateName { name, existing, id }) => {
                let span = ctx.find_span(&name);
                return Err(ctx
                    .source_context()
                    .duplicate_function_error(name, existing, id, span));
            }
            Err(err) => return Err(ctx.fail(name, err.to_string())),
        }
    }

    Ok(registry)
}

/// Module-level fallbacks applied after `[defaults]`.
fn module_defaults(decl: &ModuleDecl) -> RuntimeOptions {
    RuntimeOptions {
        region: decl.module.region.clone(),
        ..Default::default()
    }
}

fn lower_trigger(func: &FunctionDecl) -> TriggerSpec {
    match func.trigger {
        TriggerKindDecl::Https => TriggerSpec::Https {
            invoker: func.invoker.clone(),
        },
        TriggerKindDecl::Callable => TriggerSpec::Callable,
        TriggerKindDecl::Pubsub => TriggerSpec::PubSub {
            // Validation guarantees presence; fall back to empty for safety.
            topic: func.topic.clone().unwrap_or_default(),
            retry: func.retry,
        },
        TriggerKindDecl::Schedule => TriggerSpec::Schedule {
            schedule: func.schedule.clone().unwrap_or_default(),
            timezone: func.timezone.clone(),
            retry: func.retry_policy.as_ref().map(lower_retry_policy),
        },
    }
}

fn lower_retry_policy(decl: &RetryPolicyDecl) -> RetryPolicy {
    RetryPolicy {
        retry_count: decl.retry_count,
        max_retry_duration: decl.max_retry_duration.clone(),
        min_backoff_duration: decl.min_backoff_duration.clone(),
        max_backoff_duration: decl.max_backoff_duration.clone(),
        max_doublings: decl.max_doublings,
    }
}

fn lower_options(options: &OptionsDecl, region: Option<String>) -> RuntimeOptions {
    RuntimeOptions {
        region,
        memory: lower_memory(&options.memory),
        timeout_seconds: lower_int(&options.timeout_seconds),
        min_instances: lower_int(&options.min_instances),
        max_instances: lower_int(&options.max_instances),
        concurrency: lower_int(&options.concurrency),
        vpc: match &options.vpc {
            None => Setting::Inherit,
            Some(vpc) => Setting::Value(VpcOptions {
                connector: vpc.connector.clone(),
                egress_settings: vpc.egress_settings,
            }),
        },
        ingress: lower_ingress(&options.ingress),
        service_account: lower_string(&options.service_account),
        labels: options.labels.clone(),
        secrets: options.secrets.clone(),
    }
}

fn lower_int(setting: &Option<IntSetting>) -> Setting<u32> {
    match setting {
        None => Setting::Inherit,
        Some(IntSetting::Keyword(_)) => Setting::Restore,
        Some(IntSetting::Value(v)) => Setting::Value(*v),
    }
}

fn lower_memory(setting: &Option<IntSetting>) -> Setting<MemorySize> {
    match setting {
        None => Setting::Inherit,
        Some(IntSetting::Keyword(_)) => Setting::Restore,
        // Validation guarantees the size is one the provider accepts.
        Some(IntSetting::Value(mb)) => match MemorySize::from_mb(*mb) {
            Some(size) => Setting::Value(size),
            None => Setting::Inherit,
        },
    }
}

fn lower_ingress(setting: &Option<String>) -> Setting<IngressSettings> {
    match setting.as_deref() {
        None => Setting::Inherit,
        Some("default") => Setting::Restore,
        Some(value) => match value.parse() {
            Ok(ingress) => Setting::Value(ingress),
            Err(()) => Setting::Inherit,
        },
    }
}

fn lower_string(setting: &Option<String>) -> Setting<String> {
    match setting.as_deref() {
        None => Setting::Inherit,
        Some("default") => Setting::Restore,
        Some(value) => Setting::Value(value.to_string()),
    }
}

fn param_default(value: &Value) -> ParamDefault {
    match value {
        Value::String(s) => ParamDefault::String(s.clone()),
        Value::Integer(i) => ParamDefault::Int(*i),
        Value::Float(f) => ParamDefault::Float(*f),
        Value::Boolean(b) => ParamDefault::Bool(*b),
        // Validation restricts defaults to scalars.
        other => ParamDefault::String(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn registry_for(content: &str) -> Registry {
        let decl = ModuleDecl::from_str(content).unwrap();
        build_registry(&decl, content, "functions.toml").unwrap()
    }

    #[test]
    fn test_registration_order_matches_declaration() {
        let registry = registry_for(
            r#"
            [module]
            name = "app"

            [functions.second_one]
            trigger = "callable"

            [functions.first_one]
            trigger = "https"
            "#,
        );

        let names: Vec<_> = registry.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["second_one", "first_one"]);
    }

    #[test]
    fn test_handler_defaults_to_declared_name() {
        let registry = registry_for(
            r#"
            [module]
            name = "app"

            [functions.greet]
            trigger = "https"

            [functions.farewell]
            trigger = "https"
            handler = "handlers::say_goodbye"
            "#,
        );

        assert_eq!(registry.get("greet").unwrap().handler, "greet");
        assert_eq!(
            registry.get("farewell").unwrap().handler,
            "handlers::say_goodbye"
        );
    }

    #[test]
    fn test_defaults_merge_under_function_options() {
        let registry = registry_for(
            r#"
            [module]
            name = "app"
            region = "europe-west1"

            [defaults]
            max_instances = 100
            memory = 512

            [functions.greet]
            trigger = "https"
            memory = 256
            "#,
        );

        let greet = registry.get("greet").unwrap();
        assert_eq!(greet.options.memory, Setting::Value(MemorySize::Mb256));
        assert_eq!(greet.options.max_instances, Setting::Value(100));
        assert_eq!(greet.options.region.as_deref(), Some("europe-west1"));
    }

    #[test]
    fn test_function_region_beats_module_region() {
        let registry = registry_for(
            r#"
            [module]
            name = "app"
            region = "europe-west1"

            [functions.greet]
            trigger = "https"
            region = "asia-east1"
            "#,
        );

        let greet = registry.get("greet").unwrap();
        assert_eq!(greet.options.region.as_deref(), Some("asia-east1"));
    }

    #[test]
    fn test_sentinel_lowers_to_restore() {
        let registry = registry_for(
            r#"
            [module]
            name = "app"

            [functions.greet]
            trigger = "https"
            max_instances = "default"
            ingress = "default"
            "#,
        );

        let greet = registry.get("greet").unwrap();
        assert_eq!(greet.options.max_instances, Setting::Restore);
        assert_eq!(greet.options.ingress, Setting::Restore);
    }

    #[test]
    fn test_pubsub_trigger_lowering() {
        let registry = registry_for(
            r#"
            [module]
            name = "app"

            [functions.on_user_created]
            trigger = "pubsub"
            topic = "users"
            retry = true
            "#,
        );

        let func = registry.get("on_user_created").unwrap();
        assert_eq!(
            func.trigger,
            TriggerSpec::PubSub {
                topic: "users".to_string(),
                retry: Some(true),
            }
        );
    }

    #[test]
    fn test_duplicate_endpoint_reported_with_decl_error() {
        let content = r#"
            [module]
            name = "app"

            [functions.my_func]
            trigger = "https"

            [functions.myfunc]
            trigger = "callable"
        "#;
        let decl = ModuleDecl::from_str(content).unwrap();
        let err = build_registry(&decl, content, "functions.toml").unwrap_err();
        assert!(matches!(*err, crate::Error::DuplicateFunction { .. }));
    }

    #[test]
    fn test_params_declared_in_order() {
        let registry = registry_for(
            r#"
            [module]
            name = "app"

            [params.TOPIC]
            type = "string"
            default = "welcome"

            [params.API_KEY]
            type = "secret"
            "#,
        );

        let names: Vec<_> = registry.params().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["TOPIC", "API_KEY"]);
    }
}
