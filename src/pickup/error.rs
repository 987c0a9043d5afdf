use thiserror::Error;

/// 拾取物各环节的失败原因。全部在本模块内吸收，只打日志
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PickupError {
    #[error("item row `{0}` is not in the catalog")]
    InvalidCatalogReference(String),
    #[error("pickup has no item row set")]
    MissingCatalogRow,
    #[error("dropped pickup was given no item")]
    MissingItemOnDrop,
    #[error("interactor has no inventory")]
    MissingInventoryCapability,
    #[error("pickup holds no item")]
    MissingItemReference,
}
