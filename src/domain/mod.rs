pub mod entities;
pub mod parser;
pub mod ports;
pub mod rotation;
pub mod rules;
pub mod schedule;
pub mod value_objects;
