//! Domain Services
//!
//! Stateless logic over entities held in a `ContainerRegistry`.

mod setting_resolver;

pub use setting_resolver::{ResolvedSetting, SettingResolver};
