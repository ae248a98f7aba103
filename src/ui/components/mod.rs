//! Reusable UI components

pub mod context_menu;
