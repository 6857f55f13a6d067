use crate::domain::common::entities::app_errors::CoreError;

/// Port for the string key-value store backing the inventory. Calls are
/// synchronous: a successful `set` means the value is durable.
#[cfg_attr(test, mockall::automock)]
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
}
