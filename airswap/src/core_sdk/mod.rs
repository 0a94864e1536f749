pub mod address_book;
pub mod network;
pub mod reasons;
