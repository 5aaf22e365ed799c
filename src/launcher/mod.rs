//! Platform assembly
//!
//! Resolves the optional gateway and app plugins, registers whatever is
//! installed with the engine and reports the rest. A missing or broken
//! plugin never stops the launch.

pub mod engine;
pub mod plugin;

pub use engine::{Engine, MainEngine};
pub use plugin::{
    default_apps, default_gateways, ManifestResolver, PluginError, PluginHandle, PluginKind,
    PluginResolver, PluginSpec,
};

use crate::i18n::Translator;

/// A plugin that was not registered, and why
#[derive(Debug, Clone)]
pub struct SkippedPlugin {
    pub spec: PluginSpec,
    pub reason: PluginError,
}

/// Outcome of one load pass
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub gateways: Vec<PluginSpec>,
    pub apps: Vec<PluginSpec>,
    pub skipped: Vec<SkippedPlugin>,
}

impl LoadReport {
    pub fn loaded_count(&self) -> usize {
        self.gateways.len() + self.apps.len()
    }

    /// One translated `✓`/`✗` line per plugin: loaded first, then skipped
    pub fn status_lines(&self, translator: &Translator) -> Vec<String> {
        let loaded = self.gateways.iter().chain(&self.apps).map(|spec| {
            format!(
                "✓ {} {}",
                translator.translate("已加载"),
                translator.translate(&spec.description)
            )
        });
        let skipped = self
            .skipped
            .iter()
            .map(|skipped| skip_message(translator, skipped));
        loaded.chain(skipped).collect()
    }

    /// Translated load summary
    pub fn summary(&self, translator: &Translator) -> String {
        let mut out = format!("\n=== {} ===\n", translator.translate("加载总结"));

        out.push_str(&format!(
            "{}: {}\n",
            translator.translate("成功加载网关"),
            self.gateways.len()
        ));
        for spec in &self.gateways {
            out.push_str(&format!("  • {}\n", translator.translate(&spec.description)));
        }

        out.push_str(&format!(
            "\n{}: {}\n",
            translator.translate("成功加载应用"),
            self.apps.len()
        ));
        for spec in &self.apps {
            out.push_str(&format!("  • {}\n", translator.translate(&spec.description)));
        }

        out.push_str("=================\n");
        out
    }
}

/// One status line for a skipped plugin
pub fn skip_message(translator: &Translator, skipped: &SkippedPlugin) -> String {
    let description = translator.translate(&skipped.spec.description);
    match &skipped.reason {
        PluginError::NotInstalled(_) => format!(
            "✗ {} {}",
            description,
            translator.translate("模块未安装，跳过加载")
        ),
        PluginError::ClassNotFound { .. } => format!(
            "✗ {} {}",
            description,
            translator.translate("类未找到，跳过加载")
        ),
        PluginError::Failed(e) => format!(
            "✗ {} {}: {}",
            description,
            translator.translate("加载时出错"),
            e
        ),
    }
}

/// Resolve and register each plugin in turn
///
/// Only debug records are logged here; the user-facing status lines are
/// built from the returned report by the caller.
pub fn load_plugins(
    specs: &[PluginSpec],
    resolver: &dyn PluginResolver,
    engine: &mut dyn Engine,
    translator: &Translator,
) -> LoadReport {
    let mut report = LoadReport::default();

    for spec in specs {
        let registered = resolver.resolve(spec).and_then(|handle| {
            let result = match spec.kind {
                PluginKind::Gateway => engine.add_gateway(handle),
                PluginKind::App => engine.add_app(handle),
            };
            result.map_err(|e| {
                PluginError::Failed(format!("{}: {}", translator.translate("注册失败"), e))
            })
        });

        match registered {
            Ok(()) => {
                tracing::debug!("Registered {:?} {}.{}", spec.kind, spec.module, spec.class);
                match spec.kind {
                    PluginKind::Gateway => report.gateways.push(spec.clone()),
                    PluginKind::App => report.apps.push(spec.clone()),
                }
            }
            Err(reason) => {
                tracing::debug!(
                    "Skipped {:?} {}.{}: {}",
                    spec.kind,
                    spec.module,
                    spec.class,
                    reason
                );
                report.skipped.push(SkippedPlugin {
                    spec: spec.clone(),
                    reason,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::FixedLocale;
    use std::collections::HashMap;

    /// Resolver with a fixed outcome per class
    struct StaticResolver(HashMap<&'static str, Result<(), PluginError>>);

    impl PluginResolver for StaticResolver {
        fn resolve(&self, spec: &PluginSpec) -> Result<PluginHandle, PluginError> {
            match self.0.get(spec.class.as_str()) {
                Some(Ok(())) => Ok(PluginHandle {
                    module: spec.module.clone(),
                    class: spec.class.clone(),
                    version: None,
                }),
                Some(Err(e)) => Err(e.clone()),
                None => Err(PluginError::NotInstalled(spec.module.clone())),
            }
        }
    }

    fn english() -> Translator {
        let translator = Translator::builder()
            .env_var("TRADER_LAUNCHER_TEST_LANG_LAUNCHER")
            .locale_probe(FixedLocale(Some("en_US".to_string())))
            .build();
        translator.ensure_ready();
        translator
    }

    #[test]
    fn test_load_continues_past_failures() {
        let resolver = StaticResolver(HashMap::from([
            ("OkxGateway", Ok(())),
            (
                "BybitGateway",
                Err(PluginError::Failed("bad manifest".to_string())),
            ),
            ("CtaStrategyApp", Ok(())),
        ]));
        let specs = [
            PluginSpec::gateway("vnpy_okx", "OkxGateway", "OKX交易所网关"),
            PluginSpec::gateway("vnpy_bybit", "BybitGateway", "Bybit交易所网关"),
            PluginSpec::gateway("vnpy_futu", "FutuGateway", "富途证券网关"),
            PluginSpec::app("vnpy_ctastrategy", "CtaStrategyApp", "CTA策略应用"),
        ];
        let mut engine = MainEngine::new();

        let report = load_plugins(&specs, &resolver, &mut engine, &english());

        assert_eq!(report.loaded_count(), 2);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(engine.gateways().len(), 1);
        assert_eq!(engine.apps().len(), 1);
    }

    #[test]
    fn test_duplicate_registration_is_skipped() {
        let resolver = StaticResolver(HashMap::from([("OkxGateway", Ok(()))]));
        let spec = PluginSpec::gateway("vnpy_okx", "OkxGateway", "OKX交易所网关");
        let mut engine = MainEngine::new();

        let report = load_plugins(&[spec.clone(), spec], &resolver, &mut engine, &english());

        assert_eq!(report.gateways.len(), 1);
        assert!(matches!(report.skipped[0].reason, PluginError::Failed(_)));
    }

    #[test]
    fn test_status_lines_once_per_plugin() {
        let resolver = StaticResolver(HashMap::from([
            ("OkxGateway", Ok(())),
            ("CtaStrategyApp", Ok(())),
        ]));
        let specs = [
            PluginSpec::gateway("vnpy_okx", "OkxGateway", "OKX交易所网关"),
            PluginSpec::gateway("vnpy_futu", "FutuGateway", "富途证券网关"),
            PluginSpec::app("vnpy_ctastrategy", "CtaStrategyApp", "CTA策略应用"),
        ];
        let translator = english();
        let report = load_plugins(&specs, &resolver, &mut MainEngine::new(), &translator);

        assert_eq!(
            report.status_lines(&translator),
            vec![
                "✓ Loaded OKX Exchange Gateway",
                "✓ Loaded CTA Strategy",
                "✗ Futu Securities Gateway module not installed, skipped",
            ]
        );
    }

    #[test]
    fn test_summary_is_translated() {
        let report = LoadReport {
            gateways: vec![PluginSpec::gateway("vnpy_okx", "OkxGateway", "OKX交易所网关")],
            apps: Vec::new(),
            skipped: Vec::new(),
        };

        let summary = report.summary(&english());
        assert!(summary.contains("Load Summary"));
        assert!(summary.contains("Gateways loaded: 1"));
        assert!(summary.contains("  • OKX Exchange Gateway"));
        assert!(summary.contains("Apps loaded: 0"));
    }

    #[test]
    fn test_skip_messages() {
        let translator = english();
        let spec = PluginSpec::gateway("vnpy_futu", "FutuGateway", "富途证券网关");

        let not_installed = SkippedPlugin {
            spec: spec.clone(),
            reason: PluginError::NotInstalled("vnpy_futu".to_string()),
        };
        assert_eq!(
            skip_message(&translator, &not_installed),
            "✗ Futu Securities Gateway module not installed, skipped"
        );

        let failed = SkippedPlugin {
            spec,
            reason: PluginError::Failed("boom".to_string()),
        };
        assert_eq!(
            skip_message(&translator, &failed),
            "✗ Futu Securities Gateway failed to load: boom"
        );
    }
}
