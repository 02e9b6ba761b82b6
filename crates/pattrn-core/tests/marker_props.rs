// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests for style keys, marker building and classification.

use pattrn_core::{
    build_marker, classify, DatasetPalette, InstanceSettings, LayerContext, LayerData, LayerGroup,
    LayerStyle, StyleClass, VariableDescriptor, VariableType,
};
use pattrn_dry_tests::RecordBuilder;
use proptest::prelude::*;

fn variable_type() -> impl Strategy<Value = VariableType> {
    prop::sample::select(VariableType::ALL.to_vec())
}

proptest! {
    #[test]
    fn style_key_always_joins_group_and_data(
        group in "[a-z0-9_-]{0,12}",
        data in "[a-z0-9_-]{0,12}",
        pattern in prop::option::of("[a-z-]{1,10}"),
    ) {
        let class = StyleClass::new(&group, &data, pattern.as_deref());
        prop_assert!(!class.as_str().is_empty());
        prop_assert!(class.as_str().contains("__"));
        let expected = format!("{group}__{data}");
        prop_assert_eq!(class.layer_key(), expected.as_str());
        if let Some(pattern) = pattern {
            let expected = format!(" {pattern}");
            prop_assert!(class.as_str().ends_with(expected.as_str()));
        }
    }

    #[test]
    fn building_a_marker_twice_gives_the_same_descriptor(
        index in 0usize..1000,
        lat in -90.0f64..90.0,
        lon in -180.0f64..180.0,
        tag in prop::option::of("[a-z]{1,6}"),
        stroke in prop::option::of("#[0-9a-f]{3}"),
        event_id in prop::option::of("[A-Z0-9-]{1,8}"),
    ) {
        let mut builder = RecordBuilder::new().at(lat, lon);
        if let Some(tag) = &tag {
            builder = builder.data_set(tag);
        }
        if let Some(id) = &event_id {
            builder = builder.event_id(id);
        }
        let mut record = builder.build();
        record.index = index;

        let palette: DatasetPalette = [("abc", "#010203")].into_iter().collect();
        let settings = InstanceSettings::default();
        let group = LayerGroup {
            id: "g".into(),
            style: LayerStyle { stroke, patternfills_class: None },
        };
        let data = LayerData { id: "d".into() };
        let context = LayerContext { group: &group, data: &data };

        let first = build_marker(&record, &palette, context, &settings);
        let second = build_marker(&record, &palette, context, &settings);
        prop_assert_eq!(first.id.0, index);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn classification_keeps_schema_order_and_drops_empty_fields(
        fields in prop::collection::vec((variable_type(), any::<bool>()), 0..12),
    ) {
        // Field `f{i}` carries data iff its flag is set.
        let mut record = RecordBuilder::new();
        let mut variables = Vec::new();
        for (i, (kind, has_data)) in fields.iter().enumerate() {
            let id = format!("f{i}");
            if *has_data {
                record = record.var(&id, i);
            } else {
                record = record.var(&id, "");
            }
            variables.push(VariableDescriptor::new(id, *kind));
        }
        let records = vec![record.build()];

        let groups = classify(&variables, &records);

        let kinds: Vec<VariableType> = groups.iter().map(|g| g.kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(&kinds, &sorted);

        for group in &groups {
            prop_assert!(!group.names.is_empty());
            let expected: Vec<String> = fields
                .iter()
                .enumerate()
                .filter(|(_, (kind, has_data))| *kind == group.kind && *has_data)
                .map(|(i, _)| format!("f{i}"))
                .collect();
            prop_assert_eq!(&group.names, &expected);
        }

        let total: usize = groups.iter().map(|g| g.names.len()).sum();
        prop_assert_eq!(total, fields.iter().filter(|(_, has)| *has).count());
    }
}
