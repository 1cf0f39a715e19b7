//! Reduces a stylesheet to the rules that can possibly apply to one HTML
//! document.
//!
//! Two passes run over the parsed rule tree:
//!
//! * [`ReachabilityEngine`] drops every selector for which some compound part
//!   matches nothing in the document, scoped to the elements matched by the
//!   parts before it, then every rule left without selectors.
//! * [`prune_unused_at_rules`] drops `@keyframes` and `@font-face` blocks no
//!   surviving declaration refers to, and every `@media print` block.
//!
//! ```rust
//! use minimalcss_core::{minimize, MinimizeOptions};
//!
//! let output = minimize(
//!   "<h1>Header</h1>",
//!   "h1, h2 { color: red } ol { color: blue }",
//!   &MinimizeOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(output.final_css, "h1{color:red}");
//! ```
pub use cache::{Reach, ReachabilityCache};
pub use error::{InvalidSelector, MinimizeError, MinimizeResult};
pub use matcher::{parse_markup, HtmlMatcher, SelectorMatcher};
pub use minimize::{minimize, prune_stylesheet, MinimizeOutput, PruneReport};
pub use options::MinimizeOptions;
pub use reachability::{ReachabilityEngine, ReachabilityStats};
pub use selector_chain::{reduce_compound, Combinator, Segment, SelectorChain};
pub use usage::{prune_unused_at_rules, UsageSets};

mod cache;
mod error;
mod matcher;
mod minimize;
mod options;
mod reachability;
mod rule_visitor;
mod selector_chain;
mod usage;
