use super::*;

#[test]
fn test_id_display() {
  assert_eq!(ViewerId::new(3).to_string(), "v3");
  assert_eq!(ModelId::new(7).to_string(), "m7");
  assert_eq!(NodeId::from_raw(12).to_string(), "12");
}

#[test]
fn test_id_raw_round_trip() {
  assert_eq!(ViewerId::new(5).raw(), 5);
  assert_eq!(ModelId::new(9).index(), 9);
  assert!(ModelId::new(1) < ModelId::new(2));
}

/// Each kind owns a distinct queue slot, in ALL order.
#[test]
fn test_kind_indices_are_dense() {
  for (position, kind) in ActionKind::ALL.iter().enumerate() {
    assert_eq!(kind.index(), position);
  }
  assert_eq!(ActionKind::ALL.len(), ActionKind::COUNT);
}

/// Only the three coarsening kinds share the collapse effect.
#[test]
fn test_collapse_family() {
  let collapses: Vec<_> = ActionKind::ALL
    .iter()
    .filter(|kind| kind.is_collapse())
    .collect();
  assert_eq!(
    collapses,
    vec![
      &ActionKind::MustCollapse,
      &ActionKind::CollapseOnNeed,
      &ActionKind::MaybeCollapse,
    ]
  );
}

#[test]
fn test_kind_and_decision_display() {
  assert_eq!(ActionKind::MustSplit.to_string(), "must-split");
  assert_eq!(ActionKind::CollapseOnNeed.to_string(), "collapse-on-need");
  assert_eq!(Decision::Reject.to_string(), "reject");
}

#[test]
fn test_action_fields() {
  let action = Action::new(
    ActionKind::Keep,
    ViewerId::new(1),
    ModelId::new(2),
    NodeId::from_raw(3),
    0.5,
  );
  assert_eq!(action.kind, ActionKind::Keep);
  assert_eq!(action.viewer, ViewerId::new(1));
  assert_eq!(action.model, ModelId::new(2));
  assert_eq!(action.node.raw(), 3);
  assert_eq!(action.priority, 0.5);
}
