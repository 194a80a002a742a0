//! Property tests for the tree store and drop resolver.

use arbor_lib::dnd::DropDecision;
use arbor_lib::dnd::DropPosition;
use arbor_lib::dnd::DropRejection;
use arbor_lib::dnd::apply_drop;
use arbor_lib::model::Forest;
use arbor_lib::model::TreeNode;
use proptest::prelude::*;
use proptest::sample::Index;

// =============================================================================
// Strategies
// =============================================================================

/// Shape of a generated node; ids are assigned afterwards so they are unique.
#[derive(Debug, Clone)]
struct Shape {
    loaded: bool,
    expanded: bool,
    children: Vec<Shape>,
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = (any::<bool>(), any::<bool>()).prop_map(|(loaded, expanded)| Shape {
        loaded,
        expanded,
        children: Vec::new(),
    });
    leaf.prop_recursive(4, 40, 4, |inner| {
        (prop::collection::vec(inner, 0..4), any::<bool>()).prop_map(|(children, expanded)| Shape {
            loaded: true,
            expanded,
            children,
        })
    })
}

fn build(shape: &Shape, next: &mut usize) -> TreeNode {
    let id = format!("n{}", *next);
    *next += 1;
    let node = if shape.loaded {
        let children = shape.children.iter().map(|c| build(c, next)).collect();
        TreeNode::branch(id.clone(), id, children)
    } else {
        TreeNode::new(id.clone(), id)
    };
    node.expanded(shape.expanded)
}

fn forest() -> impl Strategy<Value = Forest> {
    prop::collection::vec(shape(), 1..4).prop_map(|shapes| {
        let mut next = 0;
        Forest::new(shapes.iter().map(|s| build(s, &mut next)).collect())
    })
}

fn position() -> impl Strategy<Value = DropPosition> {
    prop_oneof![
        Just(DropPosition::Before),
        Just(DropPosition::After),
        Just(DropPosition::Inside),
    ]
}

fn pick(forest: &Forest, index: &Index) -> String {
    let ids: Vec<_> = forest.iter().map(|n| n.id.clone()).collect();
    ids[index.index(ids.len())].clone()
}

#[derive(Debug, Clone)]
enum Op {
    Remove(Index),
    AddChild(Index),
    Rename(Index),
    Toggle(Index),
    Move(Index, Index, DropPosition),
    SetChildren(Index),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<Index>().prop_map(Op::Remove),
        any::<Index>().prop_map(Op::AddChild),
        any::<Index>().prop_map(Op::Rename),
        any::<Index>().prop_map(Op::Toggle),
        (any::<Index>(), any::<Index>(), position()).prop_map(|(a, b, p)| Op::Move(a, b, p)),
        any::<Index>().prop_map(Op::SetChildren),
    ]
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_absent_id_is_no_op(forest in forest(), position in position()) {
        let absent = "absent";
        prop_assert_eq!(&forest.rename(absent, "x"), &forest);
        prop_assert_eq!(&forest.remove(absent), &forest);
        prop_assert_eq!(&forest.toggle_expanded(absent), &forest);
        prop_assert_eq!(&forest.set_loading(absent, true), &forest);
        prop_assert_eq!(&forest.set_children(absent, vec![TreeNode::leaf("z", "Z")]), &forest);
        prop_assert_eq!(&forest.add_child(absent, TreeNode::leaf("z", "Z")), &forest);
        prop_assert_eq!(&forest.move_node(absent, "n0", position), &forest);
        prop_assert!(forest.find(absent).is_none());
        prop_assert!(forest.find_parent(absent).is_none());
    }

    #[test]
    fn prop_add_then_remove_round_trips(forest in forest(), parent in any::<Index>()) {
        let parent = pick(&forest, &parent);
        prop_assume!(forest.find(&parent).unwrap().is_loaded());

        let added = forest.add_child(&parent, TreeNode::leaf("fresh", "Fresh"));
        prop_assert_eq!(added.count_nodes(), forest.count_nodes() + 1);
        prop_assert_eq!(added.find_parent("fresh").map(|p| p.id.clone()), Some(parent));
        prop_assert_eq!(&added.remove("fresh"), &forest);
    }

    #[test]
    fn prop_move_preserves_node_count(
        forest in forest(),
        a in any::<Index>(),
        b in any::<Index>(),
        position in position(),
    ) {
        let dragged = pick(&forest, &a);
        let target = pick(&forest, &b);
        let moved = forest.move_node(&dragged, &target, position);
        prop_assert_eq!(moved.count_nodes(), forest.count_nodes());
        prop_assert!(moved.duplicate_ids().is_empty());
    }

    #[test]
    fn prop_drop_into_own_subtree_is_rejected(
        forest in forest(),
        a in any::<Index>(),
        b in any::<Index>(),
    ) {
        let dragged = pick(&forest, &a);
        let subtree = forest.subtree_ids(&dragged);
        let target = subtree[b.index(subtree.len())].clone();

        let (after, decision) = apply_drop(&forest, &dragged, &target, DropPosition::Inside);
        let expected = if target == dragged {
            DropRejection::SameNode
        } else {
            DropRejection::IntoOwnSubtree
        };
        prop_assert_eq!(decision, DropDecision::Rejected(expected));
        prop_assert!(after.ptr_eq(&forest));
    }

    #[test]
    fn prop_ids_stay_unique(forest in forest(), ops in prop::collection::vec(op(), 1..20)) {
        let mut forest = forest;
        for (step, op) in ops.into_iter().enumerate() {
            if forest.is_empty() {
                break;
            }
            forest = match op {
                Op::Remove(i) => forest.remove(&pick(&forest, &i)),
                Op::AddChild(i) => {
                    let parent = pick(&forest, &i);
                    forest.add_child(&parent, TreeNode::leaf(format!("new{step}"), "New"))
                }
                Op::Rename(i) => forest.rename(&pick(&forest, &i), "Renamed"),
                Op::Toggle(i) => forest.toggle_expanded(&pick(&forest, &i)),
                Op::Move(a, b, position) => {
                    let (dragged, target) = (pick(&forest, &a), pick(&forest, &b));
                    apply_drop(&forest, &dragged, &target, position).0
                }
                Op::SetChildren(i) => {
                    let id = pick(&forest, &i);
                    if forest.find(&id).unwrap().is_loaded() {
                        forest
                    } else {
                        forest.set_children(&id, vec![TreeNode::leaf(format!("{id}-loaded{step}"), "L")])
                    }
                }
            };
            prop_assert!(forest.duplicate_ids().is_empty(), "duplicates after step {}", step);
        }
    }
}
