pub mod board;
pub mod cli;
pub mod db;
pub mod error;
pub mod models;
pub mod output;
