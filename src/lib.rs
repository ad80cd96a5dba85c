pub mod agent;
pub mod chain;
pub mod cli;
pub mod config;
pub mod llm;
pub mod output_parser;
pub mod schemas;
pub mod template;
pub mod tools;
pub mod web;
pub extern crate url;
