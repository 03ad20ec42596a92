//! # Logix Rule Language - Abstract Syntax Tree
//!
//! Rules are plain lines of `field operator value`, combined into logical
//! blocks with `group and` / `group or`. Nesting is expressed with
//! indentation, the way block-structured languages do it.
//!
//! ```text
//! # adults from the DACH region, or anyone on the allow list
//! group or
//!     group and
//!         age gte 18
//!         country in ["DE", "AT", "CH"]
//!     email endsWith "@example.com"
//! status neq "banned"
//! ```
//!
//! - **[tokens]** - Lexical and structural tokens produced by the lexer
//! - **[operators]** - Comparison and logical operators
//! - **[statements]** - Conditions, groups and the statement sum type
//!
//! Top-level statements are implicitly AND-ed.
pub mod operators;
pub mod statements;
pub mod tokens;

pub use operators::{LogicalOp, Operator};
pub use statements::{Condition, Group, Statement};
pub use tokens::{Position, Token, TokenKind};
