pub mod config;
pub mod error;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
