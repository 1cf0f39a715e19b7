use std::rc::Rc;

use lightningcss::printer::PrinterOptions;
use lightningcss::rules::style::StyleRule;
use lightningcss::rules::{CssRule, CssRuleList};
use lightningcss::traits::ToCss;

use crate::cache::{Reach, ReachabilityCache};
use crate::error::{InvalidSelector, MinimizeError, MinimizeResult};
use crate::matcher::SelectorMatcher;
use crate::rule_visitor::{grouped_rules_mut, retain_rules, RuleAction};
use crate::selector_chain::SelectorChain;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReachabilityStats {
  pub queries: usize,
  pub cache_hits: usize,
  pub selectors_removed: usize,
  pub rules_removed: usize,
}

/// Decides which selectors can match something in one document.
///
/// An engine is bound to a single matcher, and therefore a single document,
/// for its whole life. Build a new one for every document.
pub struct ReachabilityEngine<'m, M: SelectorMatcher> {
  matcher: &'m M,
  cache: ReachabilityCache<M::Node>,
  stats: ReachabilityStats,
}

impl<'m, M: SelectorMatcher> ReachabilityEngine<'m, M> {
  pub fn new(matcher: &'m M) -> Self {
    ReachabilityEngine {
      matcher,
      cache: ReachabilityCache::new(),
      stats: ReachabilityStats::default(),
    }
  }

  pub fn stats(&self) -> ReachabilityStats {
    self.stats
  }

  /// Walks the chain outermost segment first, narrowing the search scope to
  /// the elements matched so far. Stops at the first prefix nothing matches.
  pub fn is_reachable(&mut self, chain: &SelectorChain) -> Result<bool, InvalidSelector> {
    let segments = match chain {
      SelectorChain::AlwaysReachable => return Ok(true),
      SelectorChain::Segments(segments) => segments,
    };

    let mut key = String::new();
    let mut scope: Option<Rc<[M::Node]>> = None;

    for segment in segments {
      segment.push_key(&mut key);

      let matched = match self.cache.get(&key) {
        Some(Reach::Empty) => {
          self.stats.cache_hits += 1;
          tracing::trace!(key = %key, "Known unreachable prefix");
          return Ok(false);
        }
        Some(Reach::Matched(nodes)) => {
          self.stats.cache_hits += 1;
          nodes.clone()
        }
        None => {
          let parents;
          let search_scope = match &scope {
            None => None,
            Some(nodes) if segment.combinator.is_sibling() => {
              parents = self.matcher.parents(nodes);
              parents.as_deref()
            }
            Some(nodes) => Some(&nodes[..]),
          };

          self.stats.queries += 1;
          tracing::trace!(key = %key, "Querying document");
          let found = self.matcher.select(&segment.text, search_scope)?;

          if found.is_empty() {
            self.cache.record_empty(key);
            return Ok(false);
          }

          self.cache.record_matched(key.clone(), found)
        }
      };

      scope = Some(matched);
    }

    Ok(true)
  }

  /// Removes every selector that cannot match the document, and every rule
  /// left without selectors.
  #[tracing::instrument(level = "debug", skip_all)]
  pub fn prune(&mut self, rules: &mut CssRuleList<'_>) -> MinimizeResult<()> {
    retain_rules(rules, |rule| self.visit_rule(rule))
  }

  fn visit_rule(&mut self, rule: &mut CssRule<'_>) -> MinimizeResult<RuleAction> {
    match rule {
      CssRule::Style(style) => self.retain_reachable_selectors(style),
      // Keyframe selectors are offsets like `from` or `30%`, not elements
      CssRule::Keyframes(_) => Ok(RuleAction::Keep),
      other => {
        let Some(nested) = grouped_rules_mut(other) else {
          return Ok(RuleAction::Keep);
        };

        let was_empty = nested.0.is_empty();
        self.prune(nested)?;

        if !was_empty && nested.0.is_empty() {
          self.stats.rules_removed += 1;
          Ok(RuleAction::Remove)
        } else {
          Ok(RuleAction::Keep)
        }
      }
    }
  }

  fn retain_reachable_selectors(
    &mut self,
    style: &mut StyleRule<'_>,
  ) -> MinimizeResult<RuleAction> {
    let mut keep = Vec::with_capacity(style.selectors.0.len());
    for selector in style.selectors.0.iter() {
      let text = selector.to_css_string(PrinterOptions::default())?;
      let chain = SelectorChain::from_selector(&text);
      let reachable = self
        .is_reachable(&chain)
        .map_err(|source| MinimizeError::SelectorSyntax {
          selector: text.clone(),
          source,
        })?;

      if !reachable {
        tracing::debug!(selector = %text, "Removing unreachable selector");
        self.stats.selectors_removed += 1;
      }
      keep.push(reachable);
    }

    if keep.iter().all(|reachable| *reachable) {
      return Ok(RuleAction::Keep);
    }

    let selectors = std::mem::take(&mut style.selectors.0);
    style.selectors.0 = selectors
      .into_iter()
      .zip(keep)
      .filter_map(|(selector, reachable)| reachable.then_some(selector))
      .collect();

    if style.selectors.0.is_empty() {
      self.stats.rules_removed += 1;
      Ok(RuleAction::Remove)
    } else {
      Ok(RuleAction::Keep)
    }
  }
}
