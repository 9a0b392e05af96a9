//! Layer command-line arguments over the optional config file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use prombench_core::{
    ConfigError, ConfigResult, Pattern, ScaleCommand, ScalerConfig, parse_duration, parse_var,
};

use super::scale::ScaleArgs;

/// Everything `scale` needs once arguments and config are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub command: ScaleCommand,
    pub paths: Vec<PathBuf>,
    pub vars: BTreeMap<String, String>,
    pub field_manager: String,
}

impl Settings {
    /// Command-line values win over the file. Variable maps are merged.
    pub fn resolve(args: &ScaleArgs, config: &ScalerConfig) -> ConfigResult<Self> {
        let scale = config.scale();
        let manifests = config.manifests();

        let pattern: Pattern = match args.pattern.as_deref().or(scale.pattern.as_deref()) {
            Some(name) => name.parse()?,
            None => Pattern::default(),
        };

        let max = args
            .max
            .or(scale.max)
            .ok_or(ConfigError::MissingArgument("max"))?;
        let min = args
            .min
            .or(scale.min)
            .ok_or(ConfigError::MissingArgument("min"))?;
        let interval = args
            .interval
            .as_deref()
            .or(scale.interval.as_deref())
            .ok_or(ConfigError::MissingArgument("interval"))
            .and_then(parse_duration)?;
        let step_factor = args.step_factor.or(scale.step_factor);

        let command = ScaleCommand::new(pattern, max, min, interval, step_factor)?;

        let paths = if args.files.is_empty() {
            manifests.paths
        } else {
            args.files.clone()
        };
        if paths.is_empty() {
            return Err(ConfigError::MissingArgument("file"));
        }

        let mut vars = manifests.vars;
        for arg in &args.vars {
            let (key, value) = parse_var(arg)?;
            vars.insert(key, value);
        }

        let field_manager = args
            .field_manager
            .clone()
            .unwrap_or_else(|| config.field_manager().to_string());

        Ok(Self {
            command,
            paths,
            vars,
            field_manager,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use prombench_core::config::DEFAULT_FIELD_MANAGER;
    use std::time::Duration;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ScaleArgs,
    }

    fn args(argv: &[&str]) -> ScaleArgs {
        let mut full = vec!["scale"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn positional_arguments() {
        let settings = Settings::resolve(
            &args(&["-f", "web.yaml", "-v", "NAMESPACE=scale", "20", "1", "15m"]),
            &ScalerConfig::default(),
        )
        .unwrap();

        assert_eq!(settings.command.pattern, Pattern::Burst);
        assert_eq!(settings.command.max, 20);
        assert_eq!(settings.command.min, 1);
        assert_eq!(settings.command.interval, Duration::from_secs(900));
        assert_eq!(settings.command.step_factor, None);
        assert_eq!(settings.paths, [PathBuf::from("web.yaml")]);
        assert_eq!(settings.vars["NAMESPACE"], "scale");
        assert_eq!(settings.field_manager, DEFAULT_FIELD_MANAGER);
    }

    #[test]
    fn step_with_factor() {
        let settings = Settings::resolve(
            &args(&["-f", "web.yaml", "100", "0", "1m", "step", "25"]),
            &ScalerConfig::default(),
        )
        .unwrap();
        assert_eq!(settings.command.pattern, Pattern::Step);
        assert_eq!(settings.command.step_factor, Some(25));
    }

    #[test]
    fn invalid_pattern() {
        let err = Settings::resolve(
            &args(&["-f", "web.yaml", "20", "1", "1s", "foo"]),
            &ScalerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern(p) if p == "foo"));
    }

    #[test]
    fn missing_arguments() {
        let none = ScalerConfig::default();
        assert!(matches!(
            Settings::resolve(&args(&["-f", "web.yaml"]), &none),
            Err(ConfigError::MissingArgument("max"))
        ));
        assert!(matches!(
            Settings::resolve(&args(&["-f", "web.yaml", "20", "1"]), &none),
            Err(ConfigError::MissingArgument("interval"))
        ));
        assert!(matches!(
            Settings::resolve(&args(&["20", "1", "1s"]), &none),
            Err(ConfigError::MissingArgument("file"))
        ));
    }

    #[test]
    fn config_file_fills_gaps() {
        let config: ScalerConfig = toml::from_str(
            r#"
[scale]
pattern = "step"
max = 100
min = 0
interval = "30s"

[manifests]
paths = ["manifests"]
vars = { NAMESPACE = "from-file", RELEASE = "v1" }

[cluster]
field_manager = "bench"
"#,
        )
        .unwrap();

        let settings =
            Settings::resolve(&args(&["-v", "NAMESPACE=from-cli", "50"]), &config).unwrap();

        assert_eq!(settings.command.pattern, Pattern::Step);
        assert_eq!(settings.command.max, 50);
        assert_eq!(settings.command.min, 0);
        assert_eq!(settings.command.interval, Duration::from_secs(30));
        assert_eq!(settings.paths, [PathBuf::from("manifests")]);
        assert_eq!(settings.vars["NAMESPACE"], "from-cli");
        assert_eq!(settings.vars["RELEASE"], "v1");
        assert_eq!(settings.field_manager, "bench");
    }

    #[test]
    fn bounds_are_validated() {
        let err = Settings::resolve(
            &args(&["-f", "web.yaml", "1", "20", "1s"]),
            &ScalerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MaxBelowMin { max: 1, min: 20 }));
    }

    #[test]
    fn bad_interval_and_var() {
        let none = ScalerConfig::default();
        assert!(matches!(
            Settings::resolve(&args(&["-f", "w.yaml", "20", "1", "soon"]), &none),
            Err(ConfigError::InvalidDuration(_))
        ));
        assert!(matches!(
            Settings::resolve(&args(&["-f", "w.yaml", "-v", "oops", "20", "1", "1s"]), &none),
            Err(ConfigError::InvalidVar(_))
        ));
    }
}
