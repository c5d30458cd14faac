//! The rule table behind the forward transform.
//!
//! This module handles:
//! - Compiling ordered pattern/replacement pairs
//! - Folding a string through the table, rule by rule

pub mod rewriter;
pub mod table;

pub use rewriter::{RewriteRule, apply_rules};
pub use table::{REWRITE_PATTERNS, compile_rules, rule_table};
