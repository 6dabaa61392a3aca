//! Property-based tests using proptest

use nlu_pipeline_config::*;
use proptest::prelude::*;
use serde_json::{Map, Value};

const COMPONENT_NAMES: &[&str] = &[
    "WhitespaceTokenizer",
    "SpacyNLP",
    "RegexFeaturizer",
    "CRFEntityExtractor",
    "SpacyEntityExtractor",
    "DucklingHTTPExtractor",
    "EntitySynonymMapper",
    "CountVectorsFeaturizer",
    "EmbeddingIntentClassifier",
    "ResponseSelector",
];

fn component_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(COMPONENT_NAMES)
}

fn pipeline() -> impl Strategy<Value = Vec<ComponentSpec>> {
    prop::collection::vec(
        (component_name(), prop::option::of(0i64..1000)).prop_map(|(name, epochs)| {
            let spec = ComponentSpec::new(name);
            match epochs {
                Some(n) => spec.with_param("epochs", n),
                None => spec,
            }
        }),
        1..8,
    )
}

fn summary() -> impl Strategy<Value = TrainingCorpusSummary> {
    (0usize..3, 0usize..3, 0usize..3, 0usize..3, 0usize..3).prop_map(
        |(pretrained, regex, lookup, synonyms, responses)| {
            TrainingCorpusSummary::new()
                .with_pretrained_entity_examples(pretrained)
                .with_regex_features(regex)
                .with_lookup_tables(lookup)
                .with_entity_synonyms(synonyms)
                .with_response_examples(responses)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_set_component_attribute_idempotent_and_local(
        components in pipeline(),
        index_seed in 0usize..100,
        key in "[a-z_]{1,12}",
        value in any::<i64>(),
    ) {
        prop_assume!(key != "name");
        let original = PipelineConfig::from_parts(components, Map::new());
        let index = index_seed % original.component_count();

        let mut once = original.clone();
        once.set_component_attribute(index, [(key.clone(), value)]).unwrap();
        let mut twice = once.clone();
        twice.set_component_attribute(index, [(key.clone(), value)]).unwrap();

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.spec_at(index).unwrap().get(&key), Some(&Value::from(value)));
        for i in 0..original.component_count() {
            if i != index {
                prop_assert_eq!(once.spec_at(i).unwrap(), original.spec_at(i).unwrap());
            }
        }
    }

    #[test]
    fn test_explicit_pipeline_roundtrips_through_load(components in pipeline()) {
        let mut mapping = Map::new();
        mapping.insert(
            "pipeline".to_string(),
            serde_json::to_value(&components).unwrap(),
        );
        let config = load(mapping).unwrap();
        prop_assert_eq!(config.pipeline(), components.as_slice());

        let reloaded = ConfigLoader::new()
            .load_str(&config.to_yaml().unwrap(), "roundtrip.yml")
            .unwrap();
        prop_assert_eq!(reloaded, config);
    }

    #[test]
    fn test_overrides_keep_every_other_default(
        overrides in prop::collection::btree_map("[a-z]{1,8}", any::<bool>(), 0..6),
    ) {
        let mut mapping = Map::new();
        for (key, value) in &overrides {
            mapping.insert(key.clone(), Value::Bool(*value));
        }
        prop_assume!(!mapping.contains_key("pipeline"));

        let config = load(mapping.clone()).unwrap();
        let mut expected = DefaultSettings::default().to_mapping();
        for (key, value) in mapping {
            expected.insert(key, value);
        }
        prop_assert_eq!(config.as_mapping(), expected);
    }

    #[test]
    fn test_one_warning_per_unmet_requirement(
        names in prop::collection::vec(component_name(), 0..10),
        summary in summary(),
    ) {
        let warnings = RequirementValidator::with_defaults()
            .validate(names.iter().copied(), &summary);

        let expected: Vec<&str> = BUILTIN_REQUIREMENTS
            .iter()
            .filter(|rule| {
                rule.applies_to(&summary)
                    && !rule.satisfied_by.iter().any(|c| names.contains(c))
            })
            .map(|rule| rule.name)
            .collect();
        let actual: Vec<&str> = warnings.iter().map(|w| w.rule.as_str()).collect();
        prop_assert_eq!(actual, expected);
    }
}
