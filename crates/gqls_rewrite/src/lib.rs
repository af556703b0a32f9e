//! Import rewriting for gqls.
//!
//! Walks a source tree, finds JavaScript imports of shorthand `.gql` files,
//! converts each referenced file to a sibling `.graphql` file and points the
//! import at the generated file instead.
//!
//! ```text
//! import UserQuery from './user.gql';      // before
//! import UserQuery from './user.graphql';  // after, with user.graphql written
//! ```
//!
//! Every visited source file is written back, whether or not one of its
//! imports changed. Processing is sequential and stops at the first error.

pub mod error;
pub mod import;
pub mod rewriter;

pub use error::{RewriteError, RewriteResult};
pub use import::{ImportMatch, ImportPattern};
pub use rewriter::{rewrite_dir, rewrite_file, ImportRewrite, RewriteOptions, RewriteReport, Rewriter};
