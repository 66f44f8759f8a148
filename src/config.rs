use crate::error::{Result, WidthSyncError};
use crate::tags::{Grammar, TagVocabulary};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub tags: TagVocabulary,
}

impl Config {
    /// `~/.config/loc-width-sync/config.json` を読む（無ければ既定値）
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| WidthSyncError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("loc-width-sync").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        let tags = &self.tags;
        let names = [
            ("group_tag", &tags.group_tag),
            ("item_tag", &tags.item_tag),
            ("id_attr", &tags.id_attr),
            ("width_attr", &tags.width_attr),
            ("height_attr", &tags.height_attr),
        ];
        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(WidthSyncError::Config(format!("{} が空です", key)));
            }
        }
        Ok(())
    }

    /// 設定の語彙から文法を組み立てる
    pub fn grammar(&self) -> Result<Grammar> {
        Grammar::new(&self.tags)
    }
}
