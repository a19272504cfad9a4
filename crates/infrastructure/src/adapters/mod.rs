//! Adapters for the outbound ports.

mod reqwest_client;
mod system_navigator;

pub use reqwest_client::ReqwestAuthApi;
pub use system_navigator::SystemNavigator;
