pub mod conversions;
pub mod dispatch;
pub mod document_store;
