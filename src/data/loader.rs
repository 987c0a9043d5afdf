use bevy::asset::{io::Reader, ron, AssetLoader, LoadContext};
use std::future::Future;
use thiserror::Error;

use super::schema::ItemList;

#[derive(Default)]
pub struct RonItemLoader;

#[derive(Debug, Error)]
pub enum RonItemLoaderError {
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Could not interpret bytes as UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Duplicate item id `{0}` in catalog")]
    DuplicateId(String),
}

impl RonItemLoader {
    /// 解析并校验：行 id 不能重复，否则拾取物按 id 查表会有歧义
    pub fn parse(bytes: &[u8]) -> Result<ItemList, RonItemLoaderError> {
        let s = std::str::from_utf8(bytes)?;
        let list: ItemList = ron::de::from_str(s)?;

        let mut seen = std::collections::HashSet::new();
        for entry in &list.items {
            if !seen.insert(entry.id.to_ascii_lowercase()) {
                return Err(RonItemLoaderError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(list)
    }
}

impl AssetLoader for RonItemLoader {
    type Asset = ItemList;
    type Settings = ();
    type Error = RonItemLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext,
    ) -> impl Future<Output = Result<Self::Asset, Self::Error>> + Send {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            Self::parse(&bytes)
        }
    }

    fn extensions(&self) -> &[&str] {
        &["ron"]
    }
}
