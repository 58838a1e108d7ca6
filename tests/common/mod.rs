#![allow(dead_code)]

pub mod memory_store;
pub mod store_contract;
