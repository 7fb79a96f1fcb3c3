use assert_matches::assert_matches;

use super::*;
use crate::{hash::leaf_hash, MerkleTree};

fn abcd() -> MerkleTree<&'static str> {
    MerkleTree::new(vec!["a", "b", "c", "d"]).expect("non-empty input")
}

// ── verify_proof ─────────────────────────────────────────────────────

#[test]
fn test_verify_concrete_scenario() {
    let tree = abcd();
    let proof = tree.proof(2).expect("index in range");
    assert_eq!(proof.len(), 2);
    assert!(verify_proof("c", &proof, &tree.root(), 2));
    assert!(!verify_proof("x", &proof, &tree.root(), 2));
}

#[test]
fn test_verify_all_leaves_of_eight() {
    let items = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let tree = MerkleTree::new(items.to_vec()).expect("non-empty input");
    let root = tree.root();
    for (i, item) in items.iter().enumerate() {
        let proof = tree.proof(i).expect("index in range");
        assert!(verify_proof(*item, &proof, &root, i), "index {}", i);
    }
}

#[test]
fn test_verify_every_index_for_uneven_sizes() {
    for leaf_count in 1..=17usize {
        let items: Vec<Vec<u8>> = (0..leaf_count as u32)
            .map(|i| i.to_be_bytes().to_vec())
            .collect();
        let tree = MerkleTree::new(items.clone()).expect("non-empty input");
        let root = tree.root();
        for (i, item) in items.iter().enumerate() {
            let proof = tree.proof(i).expect("index in range");
            assert!(
                verify_proof(item, &proof, &root, i),
                "leaf_count={} index={}",
                leaf_count,
                i
            );
        }
    }
}

#[test]
fn test_verify_uses_index_parity_for_order() {
    // Leaf 1 of a two-leaf tree is a right child: H(sibling || leaf)
    let tree = MerkleTree::new(vec!["left", "right"]).expect("non-empty input");
    let proof = tree.proof(1).expect("index in range");
    assert_eq!(proof, vec![leaf_hash(b"left")]);
    assert_eq!(
        compute_root("right", &proof, 1),
        node_hash(&leaf_hash(b"left"), &leaf_hash(b"right"))
    );
    assert!(verify_proof("right", &proof, &tree.root(), 1));

    // Same data with the opposite parity combines in the wrong order
    assert!(!verify_proof("right", &proof, &tree.root(), 0));
    assert_ne!(compute_root("right", &proof, 0), tree.root());
}

#[test]
fn test_verify_parity_at_every_level() {
    // Index 5 = 0b101: right, left, right
    let items: Vec<String> = (0..8).map(|i| format!("leaf-{}", i)).collect();
    let tree = MerkleTree::new(items.clone()).expect("non-empty input");
    let proof = tree.proof(5).expect("index in range");

    let leaf = leaf_hash(b"leaf-5");
    let level1 = node_hash(&proof[0], &leaf);
    let level2 = node_hash(&level1, &proof[1]);
    let root = node_hash(&proof[2], &level2);
    assert_eq!(root, tree.root());
    assert!(verify_proof(&items[5], &proof, &tree.root(), 5));

    for wrong in [4, 1, 7] {
        assert!(!verify_proof(&items[5], &proof, &tree.root(), wrong));
    }
}

#[test]
fn test_verify_rejects_wrong_root() {
    let tree = abcd();
    let other = MerkleTree::new(vec!["a", "b", "c", "e"]).expect("non-empty input");
    let proof = tree.proof(0).expect("index in range");
    assert!(!verify_proof("a", &proof, &other.root(), 0));

    let mut root = tree.root();
    root[31] ^= 0x01;
    assert!(!verify_proof("a", &proof, &root, 0));
}

#[test]
fn test_verify_rejects_tampered_proof() {
    let tree = abcd();
    let root = tree.root();
    let proof = tree.proof(1).expect("index in range");

    let mut tampered = proof.clone();
    tampered[1][0] ^= 0x80;
    assert!(!verify_proof("b", &tampered, &root, 1));

    let truncated = &proof[..1];
    assert!(!verify_proof("b", truncated, &root, 1));

    let mut extended = proof.clone();
    extended.push(root);
    assert!(!verify_proof("b", &extended, &root, 1));

    assert!(!verify_proof("b", &[], &root, 1));
}

#[test]
fn test_verify_rejects_proof_from_other_leaf() {
    let tree = abcd();
    let proof_for_a = tree.proof(0).expect("index in range");
    assert!(!verify_proof("b", &proof_for_a, &tree.root(), 0));
    assert!(!verify_proof("b", &proof_for_a, &tree.root(), 1));
}

#[test]
fn test_verify_accepts_bytes_for_text_leaf() {
    let tree = abcd();
    let proof = tree.proof(3).expect("index in range");
    assert!(verify_proof(b"d".as_slice(), &proof, &tree.root(), 3));
    assert!(verify_proof(&b"d".to_vec(), &proof, &tree.root(), 3));
}

// ── InclusionProof ───────────────────────────────────────────────────

#[test]
fn test_inclusion_proof_verify() {
    let tree = abcd();
    let proof = tree.inclusion_proof(2).expect("index in range");
    assert!(proof.verify("c", &tree.root()));
    assert!(!proof.verify("d", &tree.root()));
    assert_eq!(proof.expected_len(), Some(2));
}

#[test]
fn test_inclusion_proof_rejects_bad_shape() {
    let tree = abcd();
    let root = tree.root();
    let proof = tree.inclusion_proof(2).expect("index in range");

    let mut wrong_size = proof.clone();
    wrong_size.padded_leaf_count = 3;
    assert_eq!(wrong_size.expected_len(), None);
    assert!(!wrong_size.verify("c", &root));

    let mut missing_sibling = proof.clone();
    missing_sibling.siblings.pop();
    assert!(!missing_sibling.verify("c", &root));

    // Index 6 halves to the same parities as 2 but lies outside the tree
    let mut outside = proof.clone();
    outside.leaf_index = 6;
    assert!(!outside.verify("c", &root));
}

#[test]
fn test_verify_rejects_index_beyond_proof_depth() {
    let tree = abcd();
    let root = tree.root();
    let proof = tree.proof(2).expect("index in range");

    // Same low bits as 2, so the halving parities alone would still match
    for index in [6usize, 10, 2 + (1 << 40)] {
        assert_eq!(compute_root("c", &proof, index), root);
        assert!(!verify_proof("c", &proof, &root, index), "index {}", index);
    }
    assert!(verify_proof("c", &proof, &root, 2));

    // A single-leaf tree only has index 0
    let single = MerkleTree::new(vec!["x"]).expect("single item is valid");
    assert!(verify_proof("x", &[], &single.root(), 0));
    assert!(!verify_proof("x", &[], &single.root(), 1));
}

#[test]
fn test_verify_long_proof_places_no_bound_on_index() {
    let siblings = vec![[3u8; 32]; usize::BITS as usize];
    let root = compute_root("item", &siblings, usize::MAX);
    assert!(verify_proof("item", &siblings, &root, usize::MAX));
}

#[test]
fn test_inclusion_proof_encoding_round_trip() {
    let tree = MerkleTree::new(vec!["a", "b", "c", "d", "e"]).expect("non-empty input");
    let proof = tree.inclusion_proof(4).expect("index in range");

    let bytes = proof.encode_to_vec().expect("encode proof");
    let decoded = InclusionProof::decode_from_slice(&bytes).expect("decode proof");
    assert_eq!(decoded, proof);
    assert!(decoded.verify("e", &tree.root()));
}

#[test]
fn test_decode_rejects_garbage() {
    assert_matches!(
        InclusionProof::decode_from_slice(&[]),
        Err(MerkleTreeError::InvalidProof(_))
    );
    assert_matches!(
        InclusionProof::decode_from_slice(&[0xff; 7]),
        Err(MerkleTreeError::InvalidProof(_))
    );
}

#[test]
fn test_decode_rejects_trailing_bytes() {
    let proof = abcd().inclusion_proof(0).expect("index in range");
    let mut bytes = proof.encode_to_vec().expect("encode proof");
    bytes.push(0);
    let err = InclusionProof::decode_from_slice(&bytes).expect_err("trailing byte");
    assert!(err.to_string().contains("trailing"), "got: {}", err);
}

#[test]
fn test_decode_rejects_inconsistent_shape() {
    let bad = InclusionProof {
        leaf_index: 0,
        padded_leaf_count: 4,
        siblings: vec![[7u8; 32]],
    };
    let bytes = bad.encode_to_vec().expect("encode proof");
    let err = InclusionProof::decode_from_slice(&bytes).expect_err("one sibling for four leaves");
    assert!(err.to_string().contains("expected 2 siblings"), "got: {}", err);

    let bad = InclusionProof {
        leaf_index: 9,
        padded_leaf_count: 8,
        siblings: vec![[7u8; 32]; 3],
    };
    let bytes = bad.encode_to_vec().expect("encode proof");
    assert_matches!(
        InclusionProof::decode_from_slice(&bytes),
        Err(MerkleTreeError::InvalidProof(_))
    );
}

// ── Hex display form ─────────────────────────────────────────────────

#[test]
fn test_root_hex_round_trip() {
    let tree = abcd();
    let encoded = tree.root_hex();
    assert_eq!(encoded.len(), 64);
    assert_eq!(encoded, encoded.to_lowercase());
    assert_eq!(crate::from_hex(&encoded).expect("valid hex"), tree.root());
}

#[test]
fn test_from_hex_rejects_bad_input() {
    assert_matches!(crate::from_hex("abcd"), Err(MerkleTreeError::InvalidDigest(_)));
    assert_matches!(
        crate::from_hex(&"zz".repeat(32)),
        Err(MerkleTreeError::InvalidDigest(_))
    );
}
