#[cfg(test)]
mod tests {
    use crate::builders::reporter::{ConsoleReporter, JsonReporter, ResultReporter};
    use crate::builders::typescript::TypescriptConfig;
    use crate::builders::validator::Validator;
    use crate::builders::webpack::WebpackConfig;
    use crate::core::config::{
        ConfigError, OptionsFormat, export_config, into_raw_options, merge_overrides,
        parse_override,
    };
    use crate::core::engine::{
        ApplyOutcome, OptionEngine, apply_options, clean_options, validate_options,
    };
    use crate::core::option::{
        OptionResult, OptionRule, OptionRuleSet, RawOptions, ValidationMode, ValidationResult,
    };
    use crate::utils::setter_name;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::path::Path;

    fn raw(value: Value) -> RawOptions {
        into_raw_options(value).unwrap()
    }

    fn rules() -> OptionRuleSet {
        OptionRuleSet::new()
            .rule("outDir", OptionRule::required())
            .rule("tsconfig", OptionRule::optional())
    }

    #[test]
    fn test_setter_name_capitalizes_first_letter() {
        assert_eq!(setter_name("outDir"), "setOutDir");
        assert_eq!(setter_name("tsconfig"), "setTsconfig");
        assert_eq!(setter_name("x"), "setX");
        assert_eq!(setter_name(""), "set");
    }

    #[test]
    fn test_clean_keeps_input_order_and_reports_dropped() {
        let input = raw(json!({ "tsconfig": "a", "bogus": 1, "outDir": "dist", "other": null }));
        let cleaned = clean_options(&rules(), &input);

        let keys: Vec<&str> = cleaned.options.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["tsconfig", "outDir"]);
        assert_eq!(cleaned.dropped, vec!["bogus", "other"]);
        assert_eq!(cleaned.options["outDir"], json!("dist"));
    }

    #[test]
    fn test_fold_of_no_results_is_valid() {
        assert_eq!(ValidationResult::fold(Vec::new()), ValidationResult::valid());
    }

    #[test]
    fn test_fold_concatenates_in_order() {
        let folded = ValidationResult::fold(vec![
            ValidationResult::invalid("first"),
            ValidationResult::valid(),
            ValidationResult::invalid("second"),
        ]);
        assert!(!folded.is_valid);
        assert_eq!(folded.error, vec!["first", "second"]);
    }

    #[test]
    fn test_required_absent_is_only_required_error() {
        let rule = OptionRule::required().with(Validator::custom("always-fails", |_| {
            ValidationResult::invalid("never reached")
        }));
        let result = rule.evaluate(None);
        assert_eq!(result.error, vec!["required"]);
    }

    #[test]
    fn test_null_counts_as_supplied() {
        let rule = OptionRule::required();
        assert!(rule.evaluate(Some(&Value::Null)).is_valid);

        let rule = OptionRule::required().with(Validator::NotEmpty);
        assert_eq!(
            rule.evaluate(Some(&Value::Null)).error,
            vec!["value must not be empty"]
        );
    }

    #[test]
    fn test_full_mode_follows_rule_order() {
        let input = raw(json!({ "tsconfig": "./tsconfig.json", "outDir": "dist" }));
        let results = validate_options(&rules(), &input, ValidationMode::Full);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["outDir", "tsconfig"]);
    }

    #[test]
    fn test_patch_mode_follows_input_order_and_skips_unruled_keys() {
        let input = raw(json!({ "tsconfig": "./tsconfig.json", "unknown": 1, "outDir": "dist" }));
        let results = validate_options(&rules(), &input, ValidationMode::Patch);
        assert_eq!(
            results,
            vec![
                OptionResult::accepted("tsconfig"),
                OptionResult::accepted("outDir"),
            ]
        );
    }

    #[test]
    fn test_apply_skips_errors_and_unsupplied_options() {
        let results = vec![
            OptionResult {
                name: "outDir".to_string(),
                errors: vec!["bad".to_string()],
            },
            OptionResult::accepted("tsconfig"),
            OptionResult::accepted("watch"),
        ];
        let input = raw(json!({ "outDir": "dist", "watch": true }));
        let mut model = TypescriptConfig::default();

        let applied = apply_options(&mut model, &results, &input);

        let outcomes: Vec<ApplyOutcome> = applied.iter().map(|a| a.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                ApplyOutcome::Skipped,
                ApplyOutcome::NotSupplied,
                ApplyOutcome::Applied,
            ]
        );
        assert_eq!(model.out_dir(), None);
        assert!(model.watch());
    }

    #[test]
    fn test_typescript_rules_and_setters() {
        let mut engine = OptionEngine::<TypescriptConfig>::from_schema();
        let input = raw(json!({
            "outDir": "dist",
            "target": "es3",
            "watch": "yes",
            "sourceRoot": "src",
        }));

        let results = engine.set_options(&input, ValidationMode::Full);

        let errors: Vec<(String, Vec<String>)> = results
            .into_iter()
            .filter(|r| !r.is_ok())
            .map(|r| (r.name, r.errors))
            .collect();
        assert_eq!(
            errors,
            vec![
                (
                    "target".to_string(),
                    vec![
                        "expected one of [es5, es2015, es2017, es2020, esnext], found \"es3\""
                            .to_string()
                    ]
                ),
                (
                    "watch".to_string(),
                    vec!["expected a boolean, found string".to_string()]
                ),
            ]
        );
        assert_eq!(engine.config().out_dir(), Some("dist"));
        assert_eq!(engine.config().source_root(), Some("src"));
        assert_eq!(engine.config().target(), None);
        assert!(!engine.config().watch());
    }

    #[test]
    fn test_owning_builder_sets_non_option_fields() {
        let mut engine = OptionEngine::<TypescriptConfig>::from_schema();
        engine.config_mut().set_project_source("/project/src");
        engine.config_mut().set_node_package_ts("/project/node_modules/typescript/lib/tsc");

        engine.set_options(&raw(json!({ "outDir": "dist" })), ValidationMode::Full);

        let config = engine.into_config();
        assert_eq!(config.project_source(), Some("/project/src"));
        assert_eq!(
            config.node_package_ts(),
            Some("/project/node_modules/typescript/lib/tsc")
        );
        assert_eq!(config.out_dir(), Some("dist"));
    }

    #[test]
    fn test_webpack_requires_entry_and_out_dir() {
        let mut engine = OptionEngine::<WebpackConfig>::from_schema();
        let results = engine.set_options(&raw(json!({ "entry": "" })), ValidationMode::Full);

        let failing: Vec<&OptionResult> = results.iter().filter(|r| !r.is_ok()).collect();
        assert_eq!(failing.len(), 2);
        assert_eq!(failing[0].name, "entry");
        assert_eq!(failing[0].errors, vec!["value must not be empty"]);
        assert_eq!(failing[1].name, "outDir");
        assert_eq!(failing[1].errors, vec!["required"]);
        assert_eq!(engine.config(), &WebpackConfig::default());
    }

    #[test]
    fn test_webpack_applies_every_option() {
        let mut engine = OptionEngine::<WebpackConfig>::from_schema();
        let input = raw(json!({
            "context": "/ext",
            "entry": "./src/index.ts",
            "loaderContext": "/ext/loaders",
            "outDir": "dist",
            "outFile": "extension.js",
            "tsconfig": "./tsconfig.json",
            "configRoot": "/ext/config",
        }));

        let report = engine.set_options_report(&input, ValidationMode::Full);

        assert!(!report.has_errors());
        assert!(report.applied.iter().all(|a| a.outcome == ApplyOutcome::Applied));
        let config = engine.config();
        assert_eq!(config.entry(), Some("./src/index.ts"));
        assert_eq!(config.loader_context(), Some("/ext/loaders"));
        assert_eq!(config.out_file(), Some("extension.js"));
        assert_eq!(config.config_root(), Some("/ext/config"));
    }

    #[test]
    fn test_parse_override_reads_json_or_string() {
        assert_eq!(parse_override("outDir=dist").unwrap(), ("outDir".to_string(), json!("dist")));
        assert_eq!(parse_override("watch=true").unwrap(), ("watch".to_string(), json!(true)));
        assert_eq!(parse_override("n=3").unwrap(), ("n".to_string(), json!(3)));
        assert_eq!(parse_override("empty=").unwrap(), ("empty".to_string(), json!("")));
        assert!(matches!(parse_override("novalue"), Err(ConfigError::InvalidOverride(_))));
        assert!(matches!(parse_override("=x"), Err(ConfigError::InvalidOverride(_))));
    }

    #[test]
    fn test_merge_overrides_last_wins() {
        let mut options = raw(json!({ "outDir": "dist" }));
        merge_overrides(&mut options, &["outDir=build", "tsconfig=a.json", "outDir=out"]).unwrap();
        assert_eq!(options["outDir"], json!("out"));
        assert_eq!(options["tsconfig"], json!("a.json"));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OptionsFormat::from_path(Path::new("a.json")).unwrap(), OptionsFormat::Json);
        assert_eq!(OptionsFormat::from_path(Path::new("a.YML")).unwrap(), OptionsFormat::Yaml);
        assert_eq!(OptionsFormat::from_path(Path::new("a.toml")).unwrap(), OptionsFormat::Toml);
        assert!(matches!(
            OptionsFormat::from_path(Path::new("a.ini")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_non_mapping_document_is_rejected() {
        assert!(matches!(
            into_raw_options(json!(["a"])),
            Err(ConfigError::NotAMapping("array"))
        ));
        assert!(into_raw_options(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_export_skips_unset_fields() {
        let mut config = WebpackConfig::default();
        config.set_entry("./index.ts");
        let exported = export_config(&config, OptionsFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&exported).unwrap();
        assert_eq!(parsed, json!({ "entry": "./index.ts" }));

        let toml = export_config(&config, OptionsFormat::Toml).unwrap();
        assert_eq!(toml.trim(), "entry = \"./index.ts\"");
    }

    #[test]
    fn test_console_reporter_lists_failures_and_dropped_keys() {
        let mut engine = OptionEngine::<TypescriptConfig>::from_schema();
        let report = engine.set_options_report(
            &raw(json!({ "tsconfig": "a.json", "bogus": 1 })),
            ValidationMode::Full,
        );

        let rendered = ConsoleReporter::new(false).render("typescript", &report).unwrap();

        assert!(rendered.contains("🔴 outDir\n  └─ required"));
        assert!(rendered.contains("🟢 tsconfig"));
        assert!(!rendered.contains("sourceRoot"));
        assert!(rendered.contains("Ignored unknown options: bogus"));
        assert!(rendered.contains("Options failed: 1"));

        let verbose = ConsoleReporter::new(true).render("typescript", &report).unwrap();
        assert!(verbose.contains("⚪ sourceRoot (not set)"));
    }

    #[test]
    fn test_json_reporter_includes_outcomes() {
        let mut engine = OptionEngine::<TypescriptConfig>::from_schema();
        let report =
            engine.set_options_report(&raw(json!({ "outDir": "dist" })), ValidationMode::Patch);

        let rendered = JsonReporter.render("typescript", &report).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed["target"], json!("typescript"));
        assert_eq!(parsed["ok"], json!(true));
        assert_eq!(parsed["results"], json!([{ "name": "outDir", "errors": [] }]));
        assert_eq!(parsed["applied"], json!([{ "name": "outDir", "outcome": "applied" }]));
    }
}
