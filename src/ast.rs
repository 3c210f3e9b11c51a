//! # Lime SQL - Tokens and Query State
//!
//! This module defines the intermediate representation used while turning a
//! SQL-flavoured query into a Lime `query` document.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Classified words produced by the classifier
//! - **[operators]** - Static keyword and operator tables
//! - **[query]** - Parser working state (table, fields, conditions, sort, limits)
//!
//! ## Quick Start
//!
//! ```text
//! SELECT DISTINCT name, email FROM person WHERE active = 1 ORDER BY name LIMIT 10
//! ```
//!
//! The lexer splits this into words, the classifier tags each word with a
//! [`Category`], and the parser folds the tokens into a [`crate::xml::Node`]
//! tree:
//!
//! ```text
//! <query distinct="1" top="10">
//!   <tables><table>person</table></tables>
//!   <conditions>
//!     <condition operator="=">
//!       <exp type="field">active</exp>
//!       <exp type="numeric">1</exp>
//!     </condition>
//!   </conditions>
//!   <fields>
//!     <field sortorder="asc" sortindex="1">name</field>
//!     <field>email</field>
//!   </fields>
//! </query>
//! ```
//!
//! ## Core Concepts
//!
//! ### Context-sensitive words
//!
//! Apart from keywords, operators, quoted literals and parentheses, a word has
//! no meaning on its own. Whether `name` is a selected column, a table, the
//! field of a predicate or a sort key depends solely on the token right before
//! it.
//!
//! ### Value datatypes
//!
//! - Quoted literals are `string`, or `date` when they contain `YYYY-MM-DD`
//! - Bare values are `numeric`, or `date` when they contain `YYYY-MM-DD`
//! - A `:type` suffix overrides either: `active = '1':numeric`
pub mod operators;
pub mod query;
pub mod tokens;

pub use query::SortOrder;
pub use tokens::{Category, Datatype, Token};
