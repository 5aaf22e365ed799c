//! Plugin descriptors and resolution
//!
//! A plugin is an optional module that exports gateway or app classes. The
//! launcher never links plugins directly; it asks a [`PluginResolver`]
//! whether a module is installed and whether it exports the wanted class.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// What a plugin registers as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind {
    Gateway,
    App,
}

/// A plugin the launcher tries to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSpec {
    /// Module name, e.g. `vnpy_okx`
    pub module: String,
    /// Exported class, e.g. `OkxGateway`
    pub class: String,
    /// Human readable description (source text, translated on display)
    pub description: String,
    pub kind: PluginKind,
}

impl PluginSpec {
    pub fn gateway(module: &str, class: &str, description: &str) -> Self {
        Self {
            module: module.to_string(),
            class: class.to_string(),
            description: description.to_string(),
            kind: PluginKind::Gateway,
        }
    }

    pub fn app(module: &str, class: &str, description: &str) -> Self {
        Self {
            module: module.to_string(),
            class: class.to_string(),
            description: description.to_string(),
            kind: PluginKind::App,
        }
    }
}

/// A resolved plugin class, ready to hand to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginHandle {
    pub module: String,
    pub class: String,
    pub version: Option<String>,
}

/// Why a plugin could not be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    #[error("module {0} is not installed")]
    NotInstalled(String),

    #[error("module {module} does not export {class}")]
    ClassNotFound { module: String, class: String },

    #[error("{0}")]
    Failed(String),
}

/// Looks up installed plugins
pub trait PluginResolver {
    fn resolve(&self, spec: &PluginSpec) -> Result<PluginHandle, PluginError>;
}

/// Contents of `<plugin_dir>/<module>.json`
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub exports: Vec<String>,
}

/// Resolves plugins from manifest files in a directory
#[derive(Debug, Clone)]
pub struct ManifestResolver {
    dir: PathBuf,
}

impl ManifestResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn load_manifest(&self, module: &str) -> Result<PluginManifest, PluginError> {
        let path = self.dir.join(format!("{}.json", module));
        if !path.exists() {
            return Err(PluginError::NotInstalled(module.to_string()));
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| PluginError::Failed(format!("Failed to read {:?}: {}", path, e)))?;
        serde_json::from_str(&content)
            .map_err(|e| PluginError::Failed(format!("Malformed manifest {:?}: {}", path, e)))
    }
}

impl PluginResolver for ManifestResolver {
    fn resolve(&self, spec: &PluginSpec) -> Result<PluginHandle, PluginError> {
        let manifest = self.load_manifest(&spec.module)?;

        if !manifest.exports.iter().any(|c| c == &spec.class) {
            return Err(PluginError::ClassNotFound {
                module: spec.module.clone(),
                class: spec.class.clone(),
            });
        }

        Ok(PluginHandle {
            module: spec.module.clone(),
            class: spec.class.clone(),
            version: manifest.version,
        })
    }
}

/// Gateways the launcher tries by default
pub fn default_gateways() -> Vec<PluginSpec> {
    vec![
        PluginSpec::gateway("vnpy_binance", "BinanceSpotGateway", "币安现货网关"),
        PluginSpec::gateway("vnpy_binance", "BinanceLinearGateway", "币安线性合约网关"),
        PluginSpec::gateway("vnpy_binance", "BinanceInverseGateway", "币安反向合约网关"),
        PluginSpec::gateway("vnpy_okx", "OkxGateway", "OKX交易所网关"),
        PluginSpec::gateway("vnpy_bybit", "BybitGateway", "Bybit交易所网关"),
        PluginSpec::gateway("vnpy_futu", "FutuGateway", "富途证券网关"),
        PluginSpec::gateway("vnpy_rpcservice", "RpcGateway", "RPC网关"),
    ]
}

/// Apps the launcher tries by default
pub fn default_apps() -> Vec<PluginSpec> {
    vec![
        PluginSpec::app("vnpy_ctastrategy", "CtaStrategyApp", "CTA策略应用"),
        PluginSpec::app("vnpy_ctabacktester", "CtaBacktesterApp", "CTA回测应用"),
        PluginSpec::app("vnpy_portfoliostrategy", "PortfolioStrategyApp", "投资组合策略应用"),
        PluginSpec::app("vnpy_spreadtrading", "SpreadTradingApp", "价差交易应用"),
        PluginSpec::app("vnpy_algotrading", "AlgoTradingApp", "算法交易应用"),
        PluginSpec::app("vnpy_optionmaster", "OptionMasterApp", "期权主控应用"),
        PluginSpec::app("vnpy_datamanager", "DataManagerApp", "数据管理应用"),
        PluginSpec::app("vnpy_datarecorder", "DataRecorderApp", "数据记录应用"),
        PluginSpec::app("vnpy_scripttrader", "ScriptTraderApp", "脚本交易应用"),
        PluginSpec::app("vnpy_chartwizard", "ChartWizardApp", "图表分析应用"),
        PluginSpec::app("vnpy_riskmanager", "RiskManagerApp", "风险管理应用"),
        PluginSpec::app("vnpy_portfoliomanager", "PortfolioManagerApp", "投资组合管理应用"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_manifest(dir: &tempfile::TempDir, module: &str, body: &str) {
        std::fs::write(dir.path().join(format!("{}.json", module)), body).unwrap();
    }

    #[test]
    fn test_resolves_exported_class() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(&dir, "vnpy_okx", r#"{"version": "2024.1", "exports": ["OkxGateway"]}"#);

        let handle = ManifestResolver::new(dir.path())
            .resolve(&PluginSpec::gateway("vnpy_okx", "OkxGateway", "OKX交易所网关"))
            .unwrap();

        assert_eq!(handle.class, "OkxGateway");
        assert_eq!(handle.version.as_deref(), Some("2024.1"));
    }

    #[test]
    fn test_missing_manifest_is_not_installed() {
        let dir = tempfile::tempdir().unwrap();
        let err = ManifestResolver::new(dir.path())
            .resolve(&PluginSpec::gateway("vnpy_futu", "FutuGateway", "富途证券网关"))
            .unwrap_err();
        assert_eq!(err, PluginError::NotInstalled("vnpy_futu".to_string()));
    }

    #[test]
    fn test_missing_export_is_class_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(&dir, "vnpy_binance", r#"{"exports": ["BinanceSpotGateway"]}"#);

        let err = ManifestResolver::new(dir.path())
            .resolve(&PluginSpec::gateway(
                "vnpy_binance",
                "BinanceInverseGateway",
                "币安反向合约网关",
            ))
            .unwrap_err();
        assert!(matches!(err, PluginError::ClassNotFound { .. }));
    }

    #[test]
    fn test_malformed_manifest_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(&dir, "vnpy_bybit", "exports = [");

        let err = ManifestResolver::new(dir.path())
            .resolve(&PluginSpec::gateway("vnpy_bybit", "BybitGateway", "Bybit交易所网关"))
            .unwrap_err();
        assert!(matches!(err, PluginError::Failed(_)));
    }

    #[test]
    fn test_default_lists() {
        assert!(default_gateways().iter().all(|s| s.kind == PluginKind::Gateway));
        assert!(default_apps().iter().all(|s| s.kind == PluginKind::App));
        assert_eq!(default_gateways().len(), 7);
        assert_eq!(default_apps().len(), 12);
    }
}
