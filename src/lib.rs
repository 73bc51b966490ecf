// SPDX-License-Identifier: Apache-2.0

//! redsona is a command-line tool that sketches a persona of a Redditor
//! from their public posting history. It downloads a user's last posts and
//! comments from Reddit's public JSON listing, matches the text against a
//! fixed taxonomy of persona categories (interests, communication style,
//! technical skills, and so on), and writes a plain-text report in which
//! every claim is backed by a numbered citation pointing at the post or
//! comment that produced it.
//!
//! # Examples
//!
//! Analyze a Redditor's last 100 posts and comments and write the report
//! to `spez_persona.txt`:
//!
//! ```bash
//! redsona https://www.reddit.com/user/spez
//! ```
//!
//! Analyze only the last 25 items and choose the output file:
//!
//! ```bash
//! redsona reddit.com/u/spez -l 25 -o spez.txt
//! ```
//!
//! Get usage and help for the tool:
//!
//! ```bash
//! redsona --help
//! ```
//!
//! The persona is assembled entirely from keyword and pattern matching;
//! a category with no matching evidence is reported as having insufficient
//! evidence, never guessed at.
//!
//! # License
//!
//! redsona is licensed under the terms of the [Apache License 2.0]. Please
//! visit the previous link for more information on licensing.
//!
//! [Apache License 2.0]: https://www.apache.org/licenses/LICENSE-2.0

pub mod classify;
pub mod cli;
pub mod clock;
pub mod count;
pub mod http;
pub mod persona;
pub mod reddit;
pub mod report;
pub mod rules;
pub mod text;

#[cfg(test)]
mod test_utils;
