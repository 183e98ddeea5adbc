use crate::config::catalog::describe_category;
use crate::config::settings::LabelSettings;
use crate::domain::model::{LocalizedText, SlotDefinition};
use crate::utils::error::{EditorError, Result};
use indexmap::IndexMap;

/// Slots shown under one category header.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGroup<'a> {
    pub label: String,
    pub slots: Vec<&'a SlotDefinition>,
}

impl SlotGroup<'_> {
    pub fn slot_ids(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.id.as_str()).collect()
    }
}

/// Group `slots` by their category label in `language`.
///
/// A slot without a category inherits the category of the slot before it.
/// Groups keep first-seen order, slots keep catalog order. Slots before the
/// first category land in the `ungrouped` group.
pub fn group_by_category<'a>(
    slots: &'a [SlotDefinition],
    language: &str,
    labels: &LabelSettings,
) -> Result<Vec<SlotGroup<'a>>> {
    let (groups, _) = slots.iter().try_fold(
        (IndexMap::<String, Vec<&'a SlotDefinition>>::new(), None::<&'a LocalizedText>),
        |(mut groups, last_category), slot| {
            let category = slot.category.as_ref().or(last_category);
            let label = resolve_label(category, language, labels)?;
            groups.entry(label).or_default().push(slot);
            Ok::<_, EditorError>((groups, category))
        },
    )?;

    Ok(groups
        .into_iter()
        .map(|(label, slots)| SlotGroup { label, slots })
        .collect())
}

fn resolve_label(
    category: Option<&LocalizedText>,
    language: &str,
    labels: &LabelSettings,
) -> Result<String> {
    let Some(category) = category else {
        return Ok(labels.ungrouped.clone());
    };
    match category.get(language) {
        Some(label) => Ok(label.clone()),
        None if labels.strict => Err(EditorError::MissingCategoryLabel {
            category: describe_category(category),
            language: language.to_string(),
        }),
        None => {
            // 保留分類名稱，避免不同分類被合併到同一組
            let described = describe_category(category);
            tracing::warn!(
                category = %described,
                language,
                "Category has no label for language, using placeholder"
            );
            Ok(format!("{} ({})", labels.missing_category, described))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Bus, UnitSpec};

    fn slot(id: &str, category: Option<&[(&str, &str)]>) -> SlotDefinition {
        SlotDefinition {
            id: id.to_string(),
            device: Bus::None,
            domain: None,
            unit: UnitSpec::One("°C".to_string()),
            category: category.map(|labels| {
                labels
                    .iter()
                    .map(|(lang, label)| (lang.to_string(), label.to_string()))
                    .collect()
            }),
            texts: LocalizedText::new(),
        }
    }

    fn summary(groups: &[SlotGroup<'_>]) -> Vec<(String, Vec<String>)> {
        groups
            .iter()
            .map(|g| {
                (
                    g.label.clone(),
                    g.slot_ids().into_iter().map(str::to_string).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_category_carry_forward() {
        let slots = vec![
            slot("a", Some(&[("en", "X")])),
            slot("b", None),
            slot("c", Some(&[("en", "Y")])),
            slot("d", None),
        ];

        let groups = group_by_category(&slots, "en", &LabelSettings::default()).unwrap();
        assert_eq!(
            summary(&groups),
            vec![
                ("X".to_string(), vec!["a".to_string(), "b".to_string()]),
                ("Y".to_string(), vec!["c".to_string(), "d".to_string()]),
            ]
        );
    }

    #[test]
    fn test_repeated_category_merges_into_first_group() {
        let slots = vec![
            slot("a", Some(&[("en", "X")])),
            slot("b", Some(&[("en", "Y")])),
            slot("c", Some(&[("en", "X")])),
        ];

        let groups = group_by_category(&slots, "en", &LabelSettings::default()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].slot_ids(), vec!["a", "c"]);
        assert_eq!(groups[1].slot_ids(), vec!["b"]);
    }

    #[test]
    fn test_language_selects_label() {
        let slots = vec![
            slot("a", Some(&[("en", "Energy"), ("de", "Energie")])),
            slot("b", None),
        ];

        let groups = group_by_category(&slots, "de", &LabelSettings::default()).unwrap();
        assert_eq!(groups[0].label, "Energie");
        assert_eq!(groups[0].slot_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_leading_slots_without_category_are_ungrouped() {
        let slots = vec![slot("a", None), slot("b", Some(&[("en", "X")])), slot("c", None)];

        let groups = group_by_category(&slots, "en", &LabelSettings::default()).unwrap();
        assert_eq!(groups[0].label, "Other");
        assert_eq!(groups[0].slot_ids(), vec!["a"]);
        assert_eq!(groups[1].slot_ids(), vec!["b", "c"]);
    }

    #[test]
    fn test_missing_label_degrades_to_placeholder() {
        let slots = vec![slot("a", Some(&[("en", "X")])), slot("b", None)];

        let groups = group_by_category(&slots, "de", &LabelSettings::default()).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "<missing> (en=X)");
        assert_eq!(groups[0].slot_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_unlabelled_categories_stay_separate() {
        let slots = vec![
            slot("a", Some(&[("en", "X")])),
            slot("b", Some(&[("en", "Y"), ("de", "Y")])),
            slot("c", Some(&[("en", "Z")])),
        ];

        let groups = group_by_category(&slots, "de", &LabelSettings::default()).unwrap();
        assert_eq!(
            summary(&groups),
            vec![
                ("<missing> (en=X)".to_string(), vec!["a".to_string()]),
                ("Y".to_string(), vec!["b".to_string()]),
                ("<missing> (en=Z)".to_string(), vec!["c".to_string()]),
            ]
        );
    }

    #[test]
    fn test_missing_label_fails_in_strict_mode() {
        let slots = vec![slot("a", Some(&[("en", "X")]))];
        let labels = LabelSettings {
            strict: true,
            ..LabelSettings::default()
        };

        let result = group_by_category(&slots, "de", &labels);
        assert!(matches!(
            result,
            Err(EditorError::MissingCategoryLabel { ref language, .. }) if language == "de"
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let groups = group_by_category(&[], "en", &LabelSettings::default()).unwrap();
        assert!(groups.is_empty());
    }
}
