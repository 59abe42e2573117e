// src/lib.rs
// Groq Chat - browser chat assistant over Groq-hosted models

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod memory;
pub mod persona;
pub mod session;
pub mod web;
