// Recommendation tree tests

use algostep::decision::{DecisionError, DecisionNode, DecisionTree, ROOT};
use algostep::registry::Registry;

fn recommended(tree: &DecisionTree, answers: &[usize]) -> &'static str {
    match tree.walk(answers).unwrap() {
        DecisionNode::Result(r) => r.id,
        DecisionNode::Question(q) => panic!("{:?} stopped at question '{}'", answers, q.id),
    }
}

#[test]
fn test_empty_walk_is_root() {
    let tree = DecisionTree::standard();
    let root = tree.walk(&[]).unwrap();
    assert_eq!(root.id(), ROOT);

    let question = root.as_question().unwrap();
    assert_eq!(question.options.len(), 5);
    assert_eq!(question.options[0].next, "sorting-root");
}

#[test]
fn test_paths_to_recommendations() {
    let tree = DecisionTree::standard();
    assert_eq!(recommended(&tree, &[0, 0, 0]), "insertion-sort");
    assert_eq!(recommended(&tree, &[0, 0, 1, 0]), "selection-sort");
    assert_eq!(recommended(&tree, &[0, 1, 1, 1]), "quick-sort");
    assert_eq!(recommended(&tree, &[1, 0]), "binary-search");
    assert_eq!(recommended(&tree, &[2, 0, 0, 0]), "bellman-ford");
    assert_eq!(recommended(&tree, &[2, 1, 0]), "dfs");
    assert_eq!(recommended(&tree, &[3, 1, 0]), "dynamic-programming");
    assert_eq!(recommended(&tree, &[4, 1]), "standard-recursion");
}

#[test]
fn test_partial_walk_stops_at_question() {
    let tree = DecisionTree::standard();
    let node = tree.walk(&[2, 0]).unwrap();
    assert_eq!(node.id(), "graph-weighted");
    assert!(node.as_result().is_none());
}

#[test]
fn test_recommendation_details() {
    let tree = DecisionTree::standard();
    let node = tree.node("dynamic-programming").unwrap();
    let result = node.as_result().unwrap();
    assert_eq!(result.runner, Some("knapsack-01"));
    assert!(!result.why.is_empty());

    let dijkstra = tree.node("dijkstra").unwrap().as_result().unwrap();
    assert_eq!(dijkstra.runner, None);
    assert!(!dijkstra.why_not.is_empty());
}

#[test]
fn test_out_of_range_option() {
    let tree = DecisionTree::standard();
    let err = tree.walk(&[0, 2]).unwrap_err();
    assert_eq!(
        err,
        DecisionError::InvalidOption {
            node: "sorting-root".to_string(),
            option: 2,
            available: 2,
        }
    );
}

#[test]
fn test_answering_a_result_fails() {
    let tree = DecisionTree::standard();
    let err = tree.walk(&[1, 0, 0]).unwrap_err();
    assert_eq!(err, DecisionError::NotAQuestion("binary-search".to_string()));
}

#[test]
fn test_unknown_node() {
    let tree = DecisionTree::standard();
    assert_eq!(
        tree.node("radix-sort").unwrap_err(),
        DecisionError::UnknownNode("radix-sort".to_string())
    );
    assert!(tree.answer("radix-sort", 0).is_err());
}

#[test]
fn test_tree_is_closed() {
    let tree = DecisionTree::standard();
    assert_eq!(tree.len(), 33);
    assert!(tree.dangling().is_empty());
    assert_eq!(tree.reachable().len(), tree.len());
}

#[test]
fn test_runner_links_exist() {
    let tree = DecisionTree::standard();
    let registry = Registry::standard();

    let linked: Vec<_> = tree.recommendations().filter_map(|r| r.runner).collect();
    assert_eq!(linked.len(), 15);
    for id in linked {
        assert!(registry.contains(id), "{} is not a runner", id);
    }
}

#[test]
fn test_nodes_serialize_with_type_tag() {
    let tree = DecisionTree::standard();
    let value = serde_json::to_value(tree.node("bfs").unwrap()).unwrap();
    assert_eq!(value["type"], "result");
    assert_eq!(value["runner"], "bfs");
    assert!(value["whyNot"].is_array());

    let value = serde_json::to_value(tree.root().unwrap()).unwrap();
    assert_eq!(value["type"], "question");
}
