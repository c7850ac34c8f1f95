//! selmark: selection match-and-mark
//!
//! Select a fragment of a document and selmark marks every occurrence of it, case-insensitively,
//! then lets you step through the occurrences in document order. The engine works on a mutable
//! document tree and restores the tree exactly when the selection goes away.
//!
//! The `selmark` binary drives the engine against markdown and text files: `find` marks a single
//! selection, `replay` feeds a scripted sequence of mouse, selection and timer events through the
//! trigger state machine.

#![warn(missing_docs)]

pub mod cli;
