//! Size, tag index and labelling invariants under arbitrary operation sequences

use framekit::frame::{Frame, Frameset, FramesetIterator};
use proptest::prelude::*;

const TAGS: [&str; 4] = ["BIAS", "DARK", "FLAT", "SCIENCE"];

#[derive(Debug, Clone)]
enum Op {
    Insert(usize),
    EraseTag(usize),
    EraseAt(usize),
    MoveToBack(usize),
    Retag(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..TAGS.len()).prop_map(Op::Insert),
        1 => (0..TAGS.len()).prop_map(Op::EraseTag),
        1 => any::<usize>().prop_map(Op::EraseAt),
        1 => any::<usize>().prop_map(Op::MoveToBack),
        1 => (any::<usize>(), 0..TAGS.len()).prop_map(|(i, t)| Op::Retag(i, t)),
    ]
}

fn apply(set: &mut Frameset, op: &Op, serial: &mut usize) {
    match *op {
        Op::Insert(tag) => {
            *serial += 1;
            set.insert(Frame::tagged(format!("f{}.fits", serial), TAGS[tag]))
                .unwrap();
        }
        Op::EraseTag(tag) => {
            set.erase(TAGS[tag]);
        }
        Op::EraseAt(index) if !set.is_empty() => {
            let id = set.id_at(index % set.len()).unwrap();
            assert!(set.erase_frame(id));
        }
        Op::MoveToBack(index) if !set.is_empty() => {
            let id = set.id_at(index % set.len()).unwrap();
            set.move_to_back(id).unwrap();
        }
        Op::Retag(index, tag) if !set.is_empty() => {
            set.update_position(index % set.len(), |f| f.set_tag(Some(TAGS[tag].to_string())))
                .unwrap();
        }
        _ => {}
    }
}

proptest! {
    #[test]
    fn prop_tag_counts_sum_to_size(ops in prop::collection::vec(op(), 0..60)) {
        let mut set = Frameset::new();
        let mut serial = 0;
        for op in &ops {
            apply(&mut set, op, &mut serial);
        }

        let counted: usize = TAGS.iter().map(|t| set.count_tags(t)).sum();
        prop_assert_eq!(counted, set.len());
        prop_assert_eq!(set.iter().count(), set.len());
        for tag in TAGS {
            prop_assert_eq!(set.find(tag).count(), set.count_tags(tag));
            prop_assert!(set.find(tag).all(|f| f.tag() == Some(tag)));
        }
    }

    #[test]
    fn prop_cursor_visits_history_in_order(ops in prop::collection::vec(op(), 0..40)) {
        let mut set = Frameset::new();
        let mut serial = 0;
        for op in &ops {
            apply(&mut set, op, &mut serial);
        }

        let mut it = FramesetIterator::new(&set);
        let mut visited = Vec::new();
        while let Some(frame) = it.get(&set).unwrap() {
            visited.push(frame.filename().map(str::to_string));
            it.advance(&set, 1).unwrap();
        }
        let expected: Vec<_> = set.iter().map(|f| f.filename().map(str::to_string)).collect();
        prop_assert_eq!(visited, expected);
    }

    #[test]
    fn prop_labels_partition_the_set(tags in prop::collection::vec(0..TAGS.len(), 1..50)) {
        let set = Frameset::try_from_frames(
            tags.iter()
                .enumerate()
                .map(|(i, t)| Frame::tagged(format!("f{}.fits", i), TAGS[*t])),
        )
        .unwrap();

        let labelling = set.labelise(|a, b| Ok(a.tag() == b.tag())).unwrap();
        prop_assert_eq!(labelling.labels.len(), set.len());

        let mut total = 0;
        for label in 0..labelling.nlabels {
            let members = set.extract(&labelling.labels, label).unwrap().unwrap();
            prop_assert_eq!(members.len(), labelling.count(label));
            let first_tag = members.get_position(0).unwrap().tag().map(str::to_string);
            prop_assert_eq!(members.count_tags(first_tag.as_deref().unwrap()), members.len());
            total += members.len();
        }
        prop_assert_eq!(total, set.len());
    }

    #[test]
    fn prop_erase_removes_exactly_the_tag(
        ops in prop::collection::vec(op(), 0..40),
        tag in 0..TAGS.len(),
    ) {
        let mut set = Frameset::new();
        let mut serial = 0;
        for op in &ops {
            apply(&mut set, op, &mut serial);
        }

        let before = set.len();
        let expected = set.count_tags(TAGS[tag]);
        prop_assert_eq!(set.erase(TAGS[tag]), expected);
        prop_assert_eq!(set.count_tags(TAGS[tag]), 0);
        prop_assert_eq!(set.len(), before - expected);
    }

    #[test]
    fn prop_duplicate_is_independent(n in 1usize..20) {
        let original = Frameset::try_from_frames(
            (0..n).map(|i| Frame::tagged(format!("f{}.fits", i), TAGS[i % TAGS.len()])),
        )
        .unwrap();
        let mut copy = original.duplicate();
        copy.erase("BIAS");

        prop_assert_eq!(original.len(), n);
        prop_assert_eq!(original.count_tags("BIAS"), (n + 3) / 4);
        prop_assert_eq!(copy.count_tags("BIAS"), 0);
    }
}
