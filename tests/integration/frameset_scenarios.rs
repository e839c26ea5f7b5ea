//! Frameset behavior through the public API

use framekit::error::ErrorKind;
use framekit::frame::{Frame, FrameGroup, Frameset, FramesetIterator};

fn flat_flat_bias() -> Frameset {
    Frameset::try_from_frames(vec![
        Frame::tagged("flat_1.fits", "FLAT"),
        Frame::tagged("flat_2.fits", "FLAT"),
        Frame::tagged("bias_1.fits", "BIAS"),
    ])
    .unwrap()
}

#[test]
fn test_find_walks_flats_then_ends() {
    let set = flat_flat_bias();
    assert_eq!(set.count_tags("FLAT"), 2);
    assert_eq!(set.count_tags("BIAS"), 1);
    assert_eq!(set.count_tags("DARK"), 0);

    let mut flats = set.find("FLAT");
    assert_eq!(flats.next().unwrap().filename(), Some("flat_1.fits"));
    assert_eq!(flats.next().unwrap().filename(), Some("flat_2.fits"));
    assert!(flats.next().is_none());
}

#[test]
fn test_size_tracks_inserts_and_erasures() {
    let mut set = flat_flat_bias();
    set.insert(Frame::tagged("flat_3.fits", "FLAT")).unwrap();
    assert_eq!(set.len(), 4);

    assert_eq!(set.erase("FLAT"), 3);
    assert_eq!(set.len(), 1);
    assert_eq!(set.erase("FLAT"), 0);

    let id = set.id_at(0).unwrap();
    assert!(set.erase_frame(id));
    assert!(set.is_empty());
    assert!(!set.erase_frame(id));
}

#[test]
fn test_iterator_walks_both_directions() {
    let set = flat_flat_bias();
    let mut it = FramesetIterator::new(&set);
    let mut forward = Vec::new();
    while let Some(frame) = it.get(&set).unwrap() {
        forward.push(frame.filename().unwrap().to_string());
        it.advance(&set, 1).unwrap();
    }
    assert_eq!(forward, vec!["flat_1.fits", "flat_2.fits", "bias_1.fits"]);

    // Past the end; one more step forward is out of range
    let err = it.advance(&set, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AccessOutOfRange);

    it.advance(&set, -1).unwrap();
    assert_eq!(it.get(&set).unwrap().unwrap().filename(), Some("bias_1.fits"));
}

#[test]
fn test_iterator_fails_fast_after_mutation() {
    let mut set = flat_flat_bias();
    let mut it = FramesetIterator::new(&set);
    set.insert(Frame::tagged("dark.fits", "DARK")).unwrap();

    let err = it.get(&set).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StaleIterator);

    it.reset(&set).unwrap();
    assert_eq!(it.get(&set).unwrap().unwrap().filename(), Some("flat_1.fits"));
}

#[test]
fn test_iterator_bound_to_its_set() {
    let set = flat_flat_bias();
    let other = set.duplicate();
    let it = FramesetIterator::new(&set);
    let err = it.get(&other).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalInput);
}

#[test]
fn test_iterator_erase_under_cursor() {
    let mut set = flat_flat_bias();
    let mut it = FramesetIterator::new(&set);
    it.advance(&set, 1).unwrap();
    let id = it.frame_id(&set).unwrap().unwrap();
    assert!(set.erase_frame(id));

    assert_eq!(set.len(), 2);
    assert_eq!(set.count_tags("FLAT"), 1);
    assert_eq!(set.find("FLAT").next().unwrap().filename(), Some("flat_1.fits"));
}

#[test]
fn test_labelise_and_extract_by_tag() {
    let set = flat_flat_bias();
    let labelling = set.labelise(|a, b| Ok(a.tag() == b.tag())).unwrap();
    assert_eq!(labelling.labels, vec![0, 0, 1]);
    assert_eq!(labelling.nlabels, 2);

    let flats = set.extract(&labelling.labels, 0).unwrap().unwrap();
    assert_eq!(flats.len(), 2);
    assert_eq!(flats.count_tags("FLAT"), 2);
    assert!(set.extract(&labelling.labels, 7).unwrap().is_none());
}

#[test]
fn test_labelise_comparator_error_aborts() {
    let set = flat_flat_bias();
    let err = set
        .labelise(|a, _| {
            if a.tag() == Some("BIAS") {
                Err(framekit::error::CoreError::IllegalInput("unreadable".into()))
            } else {
                Ok(true)
            }
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalInput);
}

#[test]
fn test_sort_then_get_position() {
    let mut set = flat_flat_bias();
    set.sort(|a, b| a.filename().cmp(&b.filename()));
    assert_eq!(set.get_position(0).unwrap().filename(), Some("bias_1.fits"));
    assert_eq!(set.get_position(2).unwrap().filename(), Some("flat_2.fits"));
    assert_eq!(
        set.get_position(3).unwrap_err().kind(),
        ErrorKind::IllegalInput
    );
}

#[test]
fn test_update_position_regroups() {
    let mut set = flat_flat_bias();
    set.update_position(2, |frame| frame.set_group(FrameGroup::Calib))
        .unwrap();
    assert_eq!(set.get_position(2).unwrap().group(), FrameGroup::Calib);
}
