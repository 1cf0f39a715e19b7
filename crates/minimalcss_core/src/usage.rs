//! Drops at-rules nothing refers to any more once unreachable rules are gone:
//! `@keyframes` no surviving animation names, `@font-face` no surviving
//! `font-family` lists. `@media print` is always dropped.
use std::collections::HashSet;

use lightningcss::media_query::MediaList;
use lightningcss::printer::PrinterOptions;
use lightningcss::properties::animation::AnimationName;
use lightningcss::properties::Property;
use lightningcss::rules::font_face::{FontFaceProperty, FontFaceRule};
use lightningcss::rules::style::StyleRule;
use lightningcss::rules::{CssRule, CssRuleList};
use lightningcss::traits::ToCss;

use crate::error::MinimizeResult;
use crate::rule_visitor::{
  grouped_rules_mut, retain_rules, walk_style_rules, RuleAction, StyleRuleVisitor,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UsageSets {
  pub animation_names: HashSet<String>,
  pub font_family_names: HashSet<String>,
}

/// Runs the four passes in order: collect animation names, drop unused
/// keyframes and print media, collect font families, drop unused font faces.
#[tracing::instrument(level = "debug", skip_all)]
pub fn prune_unused_at_rules(rules: &mut CssRuleList<'_>) -> MinimizeResult<UsageSets> {
  let animation_names = collect_animation_names(rules)?;
  remove_unused_keyframes_and_print_media(rules, &animation_names)?;

  let font_family_names = collect_font_family_names(rules)?;
  remove_unused_font_faces(rules, &font_family_names)?;

  Ok(UsageSets {
    animation_names,
    font_family_names,
  })
}

pub fn collect_animation_names(rules: &CssRuleList<'_>) -> MinimizeResult<HashSet<String>> {
  let mut collector = AnimationNameCollector::default();
  walk_style_rules(rules, &mut collector)?;
  Ok(collector.names)
}

pub fn collect_font_family_names(rules: &CssRuleList<'_>) -> MinimizeResult<HashSet<String>> {
  let mut collector = FontFamilyCollector::default();
  walk_style_rules(rules, &mut collector)?;
  Ok(collector.names)
}

fn remove_unused_keyframes_and_print_media(
  rules: &mut CssRuleList<'_>,
  animation_names: &HashSet<String>,
) -> MinimizeResult<()> {
  retain_rules(rules, |rule| match rule {
    CssRule::Keyframes(keyframes) => {
      let name = keyframes.name.to_css_string(PrinterOptions::default())?;
      if animation_names.contains(unquote(&name)) {
        return Ok(RuleAction::Keep);
      }

      tracing::debug!(name = %name, "Removing unused @keyframes");
      Ok(RuleAction::Remove)
    }
    CssRule::Media(media) if is_print(&media.query)? => {
      tracing::debug!("Removing @media print");
      Ok(RuleAction::Remove)
    }
    other => {
      if let Some(nested) = grouped_rules_mut(other) {
        remove_unused_keyframes_and_print_media(nested, animation_names)?;
      }
      Ok(RuleAction::Keep)
    }
  })
}

fn remove_unused_font_faces(
  rules: &mut CssRuleList<'_>,
  font_family_names: &HashSet<String>,
) -> MinimizeResult<()> {
  retain_rules(rules, |rule| match rule {
    CssRule::FontFace(font_face) => {
      // A face without a family can't be referenced, nor proven unused
      let Some(family) = font_face_family(font_face)? else {
        return Ok(RuleAction::Keep);
      };

      if font_family_names.contains(&family) {
        Ok(RuleAction::Keep)
      } else {
        tracing::debug!(family = %family, "Removing unused @font-face");
        Ok(RuleAction::Remove)
      }
    }
    other => {
      if let Some(nested) = grouped_rules_mut(other) {
        remove_unused_font_faces(nested, font_family_names)?;
      }
      Ok(RuleAction::Keep)
    }
  })
}

fn is_print(query: &MediaList<'_>) -> MinimizeResult<bool> {
  Ok(query.to_css_string(PrinterOptions::default())? == "print")
}

fn font_face_family(font_face: &FontFaceRule<'_>) -> MinimizeResult<Option<String>> {
  for property in &font_face.properties {
    if let FontFaceProperty::FontFamily(family) = property {
      let family = family.to_css_string(PrinterOptions::default())?;
      return Ok(Some(unquote(&family).to_string()));
    }
  }

  Ok(None)
}

#[derive(Default)]
struct AnimationNameCollector {
  names: HashSet<String>,
}

impl<'i> StyleRuleVisitor<'i> for AnimationNameCollector {
  fn visit_style_rule(&mut self, rule: &StyleRule<'i>) -> MinimizeResult<()> {
    for property in declarations(rule) {
      match property {
        Property::Animation(animations, _) => {
          for animation in animations.iter() {
            self.add(&animation.name)?;
          }
        }
        Property::AnimationName(names, _) => {
          for name in names.iter() {
            self.add(name)?;
          }
        }
        Property::Unparsed(unparsed) => {
          let value = property.value_to_css_string(PrinterOptions::default())?;
          match unparsed.property_id.name() {
            "animation" => {
              if let Some(name) = value.split_whitespace().next() {
                self.names.insert(unquote(name).to_string());
              }
            }
            "animation-name" => {
              self.names.insert(unquote(value.trim()).to_string());
            }
            _ => {}
          }
        }
        _ => {}
      }
    }

    Ok(())
  }
}

impl AnimationNameCollector {
  fn add(&mut self, name: &AnimationName<'_>) -> MinimizeResult<()> {
    if matches!(name, AnimationName::None) {
      return Ok(());
    }

    let name = name.to_css_string(PrinterOptions::default())?;
    self.names.insert(unquote(&name).to_string());
    Ok(())
  }
}

#[derive(Default)]
struct FontFamilyCollector {
  names: HashSet<String>,
}

impl<'i> StyleRuleVisitor<'i> for FontFamilyCollector {
  fn visit_style_rule(&mut self, rule: &StyleRule<'i>) -> MinimizeResult<()> {
    for property in declarations(rule) {
      match property {
        Property::FontFamily(families) => {
          for family in families {
            let family = family.to_css_string(PrinterOptions::default())?;
            self.names.insert(unquote(&family).to_string());
          }
        }
        Property::Unparsed(unparsed) if unparsed.property_id.name() == "font-family" => {
          let value = property.value_to_css_string(PrinterOptions::default())?;
          for family in value.split(',') {
            self.names.insert(unquote(family.trim()).to_string());
          }
        }
        _ => {}
      }
    }

    Ok(())
  }
}

fn declarations<'a, 'i>(rule: &'a StyleRule<'i>) -> impl Iterator<Item = &'a Property<'i>> {
  rule
    .declarations
    .declarations
    .iter()
    .chain(rule.declarations.important_declarations.iter())
}

/// Strips one matching pair of surrounding quotes.
pub fn unquote(value: &str) -> &str {
  for quote in ['"', '\''] {
    if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
      return &value[1..value.len() - 1];
    }
  }
  value
}
