/// Keys returned by a single listing call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectListing {
    pub keys: Vec<String>,
    /// The store holds more objects than one listing page returned.
    pub truncated: bool,
}

pub trait ObjectSource {
    fn list_keys(&self) -> Result<ObjectListing, String>;
    fn read_object(&self, key: &str) -> Result<Vec<u8>, String>;
}

pub trait OutcomeStore {
    fn write_object(&self, key: &str, body: &[u8]) -> Result<(), String>;
}
