/*!
 * Template engine for structure-preserving translation.
 *
 * This module contains the document model and the three operations the
 * translation workflows are built on:
 *
 * - `tokenizer`: splits a template into expression/tag/text tokens
 * - `reconcile`: merges a translated document over the original's structure
 * - `equivalence`: checks that two templates share the same shape
 *
 * Reconciliation and equivalence checking are deliberately independent
 * operations sharing only the tokenizer: one produces corrected output,
 * the other answers a yes/no question without rewriting anything.
 *
 * Everything here is pure and synchronous: plain strings in, plain
 * strings/results out, no I/O and no logging.
 */

pub mod equivalence;
pub mod reconcile;
pub mod token;
pub mod tokenizer;

// Re-export main types
pub use equivalence::{are_equivalent, EquivalenceReport};
pub use reconcile::reconcile;
pub use token::{Token, TokenKind};
pub use tokenizer::tokenize;
