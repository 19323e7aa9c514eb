//! History scenarios: grouped steps, capacity and redo tails.

use plexus_tests::prelude::*;

fn pins() -> Vec<PinDesc> {
    vec![PinDesc::input("in", "exec"), PinDesc::output("out", "exec")]
}

mod grouped_edit {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("grouped_edit")
            .node("A", &pins())
            .node("B", &pins())
            .node("C", &pins())
            .step(
                "group_three_edits",
                |fx| {
                    fx.session_mut().begin_multi_undo();
                    fx.connect("A.out", "B.in")?;
                    fx.connect("B.out", "C.in")?;
                    fx.move_node("C", 40.0, 0.0)?;
                    fx.session_mut().end_multi_undo();
                    Ok(StepOutput::Done(true))
                },
                |a| {
                    a.connected("A.out", "B.in")
                        .connected("B.out", "C.in")
                        .at("C", 40.0, 0.0)
                        .connection_events(2)
                },
            )
            .step(
                "undo_group",
                |fx| fx.undo(),
                |a| {
                    a.done()
                        .linkless("B.in")
                        .linkless("C.in")
                        .at("C", 0.0, 0.0)
                        .can_undo(false)
                },
            )
            .step(
                "redo_group",
                |fx| fx.redo(),
                |a| {
                    a.done()
                        .connected("A.out", "B.in")
                        .connected("B.out", "C.in")
                        .at("C", 40.0, 0.0)
                        .can_redo(false)
                },
            )
    }

    #[test]
    fn test_grouped_edit() {
        let fixture = scenario().run().unwrap();
        assert_eq!(fixture.session().history().len(), 5);
        assert_eq!(fixture.session().history().cursor(), Some(4));
    }
}

mod nested_groups {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("nested_groups")
            .node("A", &pins())
            .node("B", &pins())
            .step(
                "outer_group",
                |fx| {
                    let mut scope = fx.session_mut().multi_undo();
                    scope.begin_multi_undo();
                    scope.end_multi_undo();
                    drop(scope);
                    fx.connect("A.out", "B.in")
                },
                |a| a.handled(),
            )
            .step(
                "undo_connect",
                |fx| fx.undo(),
                |a| a.done().linkless("B.in").can_undo(true),
            )
            .step(
                "undo_nested_group",
                |fx| fx.undo(),
                |a| a.done().quiet().can_undo(false),
            )
    }

    #[test]
    fn test_nested_groups() {
        scenario().run().unwrap();
    }
}

mod capacity {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("capacity")
            .config(SessionConfig::new().with_history(HistoryConfig::new().with_capacity(3)))
            .node("A", &pins())
            .step(
                "four_moves",
                |fx| {
                    for x in [1.0, 2.0, 3.0] {
                        fx.move_node("A", x, 0.0)?;
                    }
                    fx.move_node("A", 4.0, 0.0)
                },
                |a| a.handled().at("A", 4.0, 0.0),
            )
            .step(
                "undo_all_possible",
                |fx| Ok(StepOutput::Done(fx.session_mut().undo_many(10) == 3)),
                |a| a.done().at("A", 1.0, 0.0).can_undo(false),
            )
            .step("undo_exhausted", |fx| fx.undo(), |a| a.not_done())
    }

    #[test]
    fn test_capacity() {
        scenario().run().unwrap();
    }
}

mod redo_tail {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("redo_tail")
            .node("A", &pins())
            .node("B", &pins())
            .step(
                "move_then_undo",
                |fx| {
                    fx.move_node("A", 9.0, 9.0)?;
                    fx.undo()
                },
                |a| a.done().can_redo(true),
            )
            .step(
                "new_edit_drops_tail",
                |fx| fx.connect("A.out", "B.in"),
                |a| a.handled().can_redo(false),
            )
            .step("redo_nothing", |fx| fx.redo(), |a| a.not_done().at("A", 0.0, 0.0))
    }

    #[test]
    fn test_redo_tail() {
        scenario().run().unwrap();
    }
}

mod recording_disabled {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("recording_disabled")
            .config(SessionConfig::new().with_record_history(false))
            .node("A", &pins())
            .node("B", &pins())
            .step(
                "connect",
                |fx| fx.connect("A.out", "B.in"),
                |a| a.handled().connected("A.out", "B.in").can_undo(false),
            )
            .step("undo_nothing", |fx| fx.undo(), |a| a.not_done().connected("A.out", "B.in"))
    }

    #[test]
    fn test_recording_disabled() {
        scenario().run().unwrap();
    }
}
