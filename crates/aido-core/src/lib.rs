pub mod dict;
pub mod dispatch;
pub mod document;
pub mod history;
pub mod recent;
pub mod settings;
pub mod suggest;
pub mod trigger;
pub mod unicode;
