mod config;
mod types;

pub(crate) use config::connect_data_store;
pub(crate) use types::DataStore;
