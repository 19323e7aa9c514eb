//! Graph-level properties checked directly against the transactions.

use plexus_core::PinDesc;
use plexus_graph::GraphEvent;
use plexus_tests::prelude::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixture with `count` nodes named N0.., each with pins "in" and "out".
fn fixture(count: usize) -> (Fixture, Vec<PinReference>) {
    let mut fx = Fixture::new();
    let mut pins = Vec::new();
    for i in 0..count {
        let name = format!("N{i}");
        fx.add_node(
            &name,
            &[PinDesc::input("in", "exec"), PinDesc::output("out", "exec")],
        )
        .unwrap();
        pins.push(fx.pin(&format!("{name}.in")).unwrap());
        pins.push(fx.pin(&format!("{name}.out")).unwrap());
    }
    fx.graph_mut().drain_events();
    (fx, pins)
}

// ========== TEST: random_edits_stay_symmetric ==========
#[test]
fn test_random_edits_stay_symmetric() {
    // GIVEN eight nodes and a seeded generator
    let (mut fx, pins) = fixture(8);
    let mut rng = StdRng::seed_from_u64(42);

    // WHEN many random connection edits run
    for _ in 0..500 {
        let a = pins[rng.gen_range(0..pins.len())];
        let b = pins[rng.gen_range(0..pins.len())];
        let graph = fx.graph_mut();
        match rng.gen_range(0..4) {
            0 | 1 => {
                graph.connect_pins(a, b);
            }
            2 => {
                graph.disconnect_pins(a, b);
            }
            _ => {
                graph.disconnect_all_pins(a);
            }
        }

        // THEN every link is mirrored
        assert!(fx.graph().broken_links().is_empty());
    }
}

#[test]
fn test_disconnect_is_idempotent() {
    let (mut fx, pins) = fixture(2);
    let (p, q) = (pins[1], pins[2]);
    fx.graph_mut().connect_pins(p, q);

    assert!(fx.graph_mut().disconnect_pins(p, q));
    let once = fx.graph().node(p.node).cloned();
    assert!(!fx.graph_mut().disconnect_pins(p, q));
    assert!(!fx.graph_mut().disconnect_all_pins(p));

    assert_eq!(fx.graph().node(p.node).cloned(), once);
}

// ========== TEST: one_event_per_transaction ==========
#[test]
fn test_one_event_per_transaction() {
    // GIVEN six nodes
    let (mut fx, pins) = fixture(6);

    // WHEN five links are made inside one connection edit
    {
        let mut edit = fx.graph_mut().edit_connections();
        for i in 0..5 {
            assert!(edit.connect(pins[i * 2 + 1], pins[i * 2 + 2]));
        }
    }

    // THEN exactly one aggregated event fired
    let events = fx.graph_mut().drain_events();
    let aggregated: Vec<&GraphEvent> = events
        .iter()
        .filter(|e| e.is_connections_changed())
        .collect();
    assert_eq!(aggregated.len(), 1);
    if let GraphEvent::ConnectionsChanged(event) = aggregated[0] {
        assert_eq!(event.nodes.len(), 6);
        assert_eq!(event.pin_count(), 10);
    }
}

#[test]
fn test_removing_pin_keeps_order_contiguous() {
    // GIVEN a node with four pins
    let mut fx = Fixture::new();
    let node = fx
        .add_node(
            "A",
            &[
                PinDesc::input("a", "x"),
                PinDesc::input("b", "x"),
                PinDesc::input("c", "x"),
                PinDesc::input("d", "x"),
            ],
        )
        .unwrap();
    let b = fx.pin("A.b").unwrap();

    // WHEN the second pin is removed
    assert!(fx.graph_mut().remove_pin(b));

    // THEN the rest shift down with no gaps
    let pins = fx.graph().node(node).unwrap().pins();
    let indices: Vec<Option<usize>> = pins
        .ordered_pins()
        .into_iter()
        .map(|p| pins.pin_index(p))
        .collect();
    assert_eq!(indices, vec![Some(0), Some(1), Some(2)]);
    let names: Vec<&str> = pins
        .ordered_pins()
        .into_iter()
        .filter_map(|p| pins.pin_desc(p).map(|d| d.name.as_str()))
        .collect();
    assert_eq!(names, vec!["a", "c", "d"]);
}

#[test]
fn test_deleting_nodes_leaves_no_dangling_links() {
    // GIVEN a chain N0 -> N1 -> N2 -> N3
    let (mut fx, pins) = fixture(4);
    for i in 0..3 {
        fx.graph_mut().connect_pins(pins[i * 2 + 1], pins[i * 2 + 2]);
    }
    let (n1, n2) = (fx.node("N1").unwrap(), fx.node("N2").unwrap());

    // WHEN the middle nodes are deleted in one edit
    {
        let mut edit = fx.graph_mut().edit_nodes();
        edit.delete(n1);
        edit.delete(n2);
    }

    // THEN no survivor references them
    for node in fx.graph().nodes() {
        for (_, links) in node.pins().connected_pins() {
            assert!(links.iter().all(|l| l.node != n1 && l.node != n2));
        }
    }
    assert!(fx.graph().broken_links().is_empty());
    let removed = fx
        .graph_mut()
        .drain_events()
        .into_iter()
        .filter(GraphEvent::is_node_removed)
        .count();
    assert_eq!(removed, 2);
}
