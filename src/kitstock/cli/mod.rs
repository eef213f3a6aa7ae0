pub mod commands;
mod print;
mod setup;
