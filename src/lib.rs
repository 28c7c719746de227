pub mod args;
pub mod catalog;
pub mod console;
pub mod dispatcher;
pub mod error;
pub mod gateway;
pub mod results;
pub mod selector;
pub mod statement;
pub mod table;
pub mod value;
