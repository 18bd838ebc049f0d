pub mod memory_store;
pub mod records;
pub mod storage_traits;
