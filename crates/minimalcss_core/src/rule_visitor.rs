use lightningcss::rules::style::StyleRule;
use lightningcss::rules::{CssRule, CssRuleList};

use crate::error::MinimizeResult;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RuleAction {
  Keep,
  Remove,
}

pub trait StyleRuleVisitor<'i> {
  fn visit_style_rule(&mut self, rule: &StyleRule<'i>) -> MinimizeResult<()>;
}

/// Visits every style rule, including those inside grouping at-rules and
/// nested style rules. Keyframe blocks are not style rules and never visited.
pub fn walk_style_rules<'i>(
  rules: &CssRuleList<'i>,
  visitor: &mut impl StyleRuleVisitor<'i>,
) -> MinimizeResult<()> {
  let mut queue = vec![rules];
  while let Some(rules) = queue.pop() {
    for rule in rules.0.iter() {
      let style = match rule {
        CssRule::Style(style) => style,
        // `@nest` rules and `&` blocks inside a style rule
        CssRule::Nesting(nesting) => &nesting.style,
        other => {
          if let Some(nested) = grouped_rules(other) {
            queue.push(nested);
          }
          continue;
        }
      };

      visitor.visit_style_rule(style)?;
      queue.push(&style.rules);
    }
  }

  Ok(())
}

/// Rebuilds `rules` from the rules `decide` keeps.
pub fn retain_rules<'i, F>(rules: &mut CssRuleList<'i>, mut decide: F) -> MinimizeResult<()>
where
  F: FnMut(&mut CssRule<'i>) -> MinimizeResult<RuleAction>,
{
  let mut kept = Vec::with_capacity(rules.0.len());
  for mut rule in std::mem::take(&mut rules.0) {
    if decide(&mut rule)? == RuleAction::Keep {
      kept.push(rule);
    }
  }

  rules.0 = kept;
  Ok(())
}

/// The block of an at-rule that only groups other rules under a condition.
pub fn grouped_rules<'a, 'i>(rule: &'a CssRule<'i>) -> Option<&'a CssRuleList<'i>> {
  match rule {
    CssRule::Media(media) => Some(&media.rules),
    CssRule::Supports(supports) => Some(&supports.rules),
    CssRule::LayerBlock(layer) => Some(&layer.rules),
    CssRule::Container(container) => Some(&container.rules),
    CssRule::MozDocument(document) => Some(&document.rules),
    CssRule::Scope(scope) => Some(&scope.rules),
    CssRule::StartingStyle(starting) => Some(&starting.rules),
    _ => None,
  }
}

pub fn grouped_rules_mut<'a, 'i>(rule: &'a mut CssRule<'i>) -> Option<&'a mut CssRuleList<'i>> {
  match rule {
    CssRule::Media(media) => Some(&mut media.rules),
    CssRule::Supports(supports) => Some(&mut supports.rules),
    CssRule::LayerBlock(layer) => Some(&mut layer.rules),
    CssRule::Container(container) => Some(&mut container.rules),
    CssRule::MozDocument(document) => Some(&mut document.rules),
    CssRule::Scope(scope) => Some(&mut scope.rules),
    CssRule::StartingStyle(starting) => Some(&mut starting.rules),
    _ => None,
  }
}
