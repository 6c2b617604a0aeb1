use crate::error::{FridgeBuddyError, Result};
use crate::matcher::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CATALOG_ENV: &str = "FRIDGE_BUDDY_CATALOG";
const CATALOG_NAMES_ENV: &str = "FRIDGE_BUDDY_CATALOG_NAMES";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// groceryItems.json のパス
    pub catalog_path: Option<PathBuf>,
    /// groceryItemsSr.json のパス
    pub names_path: Option<PathBuf>,
    #[serde(default = "default_threshold")]
    pub fuzzy_threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            names_path: None,
            fuzzy_threshold: DEFAULT_THRESHOLD,
        }
    }
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

/// あいまい照合の閾値を検証する（0.0〜1.0、NaNは不可）
pub fn validate_threshold(threshold: f32) -> Result<f32> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(FridgeBuddyError::Config(format!(
            "閾値は0.0〜1.0で指定してください: {}",
            threshold
        )));
    }
    Ok(threshold)
}

/// 読み込むカタログファイルの組
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPaths {
    pub items: PathBuf,
    pub names: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定パスから読み込み（ファイルがなければ既定値）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            validate_threshold(config.fuzzy_threshold)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FridgeBuddyError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("fridge-buddy").join("config.json"))
    }

    /// 使うカタログファイルを決める
    ///
    /// 優先順位: コマンドライン引数 → 環境変数 → 設定ファイル
    pub fn resolve_catalog_paths(
        &self,
        items_arg: Option<&Path>,
        names_arg: Option<&Path>,
    ) -> Result<CatalogPaths> {
        let items = items_arg
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CATALOG_ENV).map(PathBuf::from))
            .or_else(|| self.catalog_path.clone())
            .ok_or(FridgeBuddyError::MissingCatalog)?;

        let names = names_arg
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CATALOG_NAMES_ENV).map(PathBuf::from))
            .or_else(|| self.names_path.clone());

        Ok(CatalogPaths { items, names })
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) {
        self.catalog_path = Some(path);
    }

    pub fn set_names_path(&mut self, path: PathBuf) {
        self.names_path = Some(path);
    }

    pub fn set_fuzzy_threshold(&mut self, threshold: f32) -> Result<()> {
        self.fuzzy_threshold = validate_threshold(threshold)?;
        Ok(())
    }
}
