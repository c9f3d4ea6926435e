// Candidate intake interview.
// Core: models, validation, exit detection, question bank, prompts, controller.
// Host: session store, service (turns + persistence), HTTP handlers.

pub mod controller;
pub mod exit;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod question_bank;
pub mod service;
pub mod store;
pub mod validation;
