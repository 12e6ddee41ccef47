use packnode_core::error::PackError;
use packnode_core::model::Rect;
use packnode_core::packer::Packer;

#[test]
fn full_canvas_then_nothing_fits() {
    let mut p = Packer::new(100, 100).expect("canvas");
    let r = p.insert(100, 100).expect("exact fit");
    assert_eq!(r, Rect::new(0, 0, 100, 100));

    match p.insert(1, 1) {
        Err(PackError::DoesNotFit { width, height }) => {
            assert_eq!((width, height), (1, 1));
        }
        other => panic!("Expected DoesNotFit, got {:?}", other),
    }
}

#[test]
fn two_columns_fill_canvas_exactly() {
    let mut p = Packer::new(100, 50).expect("canvas");
    assert_eq!(p.insert(40, 50).unwrap(), Rect::new(0, 0, 40, 50));
    assert_eq!(p.insert(60, 50).unwrap(), Rect::new(40, 0, 100, 50));
    assert!(matches!(p.insert(1, 1), Err(PackError::DoesNotFit { .. })));
    assert_eq!(p.used_area(), 100 * 50);
    assert_eq!(p.free_area(), 0);
}

#[test]
fn second_rect_lands_in_right_strip() {
    let mut p = Packer::new(10, 10).expect("canvas");
    assert_eq!(p.insert(6, 4).unwrap(), Rect::new(0, 0, 6, 4));

    // Root split: right strip (6,0,10,4), bottom strip (0,4,10,10).
    let (right, bottom) = p.node(p.root()).expect("root").children().expect("root is internal");
    assert_eq!(p.node(right).unwrap().rect(), Rect::new(6, 0, 10, 4));
    assert_eq!(p.node(bottom).unwrap().rect(), Rect::new(0, 4, 10, 10));

    assert_eq!(p.insert(3, 3).unwrap(), Rect::new(6, 0, 9, 3));
}

#[test]
fn right_strip_height_is_bounded_by_placement() {
    let mut p = Packer::new(10, 10).expect("canvas");
    p.insert(6, 4).unwrap();
    // 4x5 would fit in the space right of the first rect if the strip were full height,
    // but the right strip is only 4 tall, so it goes to the bottom strip.
    assert_eq!(p.insert(4, 5).unwrap(), Rect::new(0, 4, 4, 9));
}

#[test]
fn first_child_wins_even_if_second_is_tighter() {
    let mut p = Packer::new(20, 20).expect("canvas");
    p.insert(10, 10).unwrap();
    // Right strip is 10x10, bottom strip is 20x10: a 10x10 goes right first.
    assert_eq!(p.insert(10, 10).unwrap(), Rect::new(10, 0, 20, 10));
    assert_eq!(p.insert(10, 10).unwrap(), Rect::new(0, 10, 10, 20));
    assert_eq!(p.insert(10, 10).unwrap(), Rect::new(10, 10, 20, 20));
    assert!(!p.can_insert(1, 1));
}

#[test]
fn zero_canvas_is_rejected() {
    match Packer::new(0, 10) {
        Err(PackError::InvalidCanvas { width, height }) => {
            assert_eq!(width, 0);
            assert_eq!(height, 10);
        }
        other => panic!("Expected InvalidCanvas, got {:?}", other),
    }
    assert!(matches!(
        Packer::new(10, 0),
        Err(PackError::InvalidCanvas { .. })
    ));
}

#[test]
fn zero_request_is_rejected_without_state_change() {
    let mut p = Packer::new(10, 10).expect("canvas");
    match p.insert(0, 5) {
        Err(PackError::InvalidRequest { width, height }) => {
            assert_eq!((width, height), (0, 5));
        }
        other => panic!("Expected InvalidRequest, got {:?}", other),
    }
    assert!(matches!(p.insert(5, 0), Err(PackError::InvalidRequest { .. })));
    assert_eq!(p.nodes().len(), 1);
    assert!(p.is_empty());

    // Behaves as if the bad requests never happened.
    assert_eq!(p.insert(6, 4).unwrap(), Rect::new(0, 0, 6, 4));
    assert_eq!(p.insert(3, 3).unwrap(), Rect::new(6, 0, 9, 3));
}

#[test]
fn failed_insert_leaves_tree_unchanged() {
    let mut p = Packer::new(10, 10).expect("canvas");
    p.insert(6, 4).unwrap();
    p.insert(3, 3).unwrap();
    let before: Vec<_> = p.nodes().iter().map(|n| (n.rect(), n.children())).collect();

    assert!(p.insert(11, 1).is_err());
    assert!(p.insert(10, 7).is_err());

    let after: Vec<_> = p.nodes().iter().map(|n| (n.rect(), n.children())).collect();
    assert_eq!(before, after);
    assert_eq!(p.len(), 2);
}

#[test]
fn can_insert_matches_insert_without_mutating() {
    let mut p = Packer::new(8, 8).expect("canvas");
    assert!(p.can_insert(8, 8));
    assert!(!p.can_insert(9, 1));
    assert!(!p.can_insert(0, 1));
    assert_eq!(p.nodes().len(), 1);

    p.insert(8, 3).unwrap();
    assert!(p.can_insert(8, 5));
    assert!(!p.can_insert(8, 6));
    assert_eq!(p.nodes().len(), 3);
}

#[test]
fn each_success_adds_two_nodes() {
    let mut p = Packer::new(64, 64).expect("canvas");
    for i in 1..=5u32 {
        p.insert(4 * i, 3).unwrap();
        assert_eq!(p.nodes().len(), 1 + 2 * i as usize);
    }
    assert_eq!(p.placements().len(), 5);
}

#[test]
fn foreign_node_handle_is_rejected() {
    let mut big = Packer::new(10, 10).expect("canvas");
    big.insert(2, 2).unwrap();
    big.insert(2, 2).unwrap();
    let small = Packer::new(10, 10).expect("canvas");

    let (_, bottom) = big
        .node(big.root())
        .and_then(|n| n.children())
        .expect("root is internal");
    assert!(big.node(bottom).is_some());
    assert!(small.node(bottom).is_none());
    assert!(small.node(small.root()).is_some_and(|n| n.is_leaf()));
}
